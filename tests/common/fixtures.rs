//! Reusable file contents for tplstack tests.

/// Text file whose content needs both backtick and quote handling
pub const QUOTED_TEXT: &str = "`hello` and \"quoted\"\n";

/// Small JSON document
pub const SMALL_JSON: &str = "{\"x\":1}";

/// Multi-line template with escapes, tabs and a carriage return
pub const TEMPLATE_HTML: &str = "<p class=\"greeting\">\n\tHello, {{ name }}!\r\n</p>\n";

/// Bytes that are not valid UTF-8
pub const BINARY_BLOB: &[u8] = &[0x00, 0xff, 0xfe, b'"', b'\\', 0x7f, b'\n'];
