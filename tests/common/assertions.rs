//! Custom assertion macros for tplstack tests.

/// Assert that a generated file exists and declares the expected static.
///
/// # Example
/// ```ignore
/// assert_generated!(env, "demo_templated.rs", "TPL");
/// ```
#[macro_export]
macro_rules! assert_generated {
    ($env:expr, $path:expr, $var:expr) => {{
        let full = $env.project_path($path);
        assert!(
            full.exists(),
            "Expected generated file to exist: {}\nProject files: {:?}",
            $path,
            $crate::common::list_all_files($env.project_root.path())
        );
        let text = $env.read_file($path);
        let decl = format!("pub static {}: &[(&str, &[u8])]", $var);
        assert!(
            text.contains(&decl),
            "Expected `{}` in {}\nActual content:\n{}",
            decl,
            $path,
            text
        );
    }};
}

/// Assert that output contains a pattern
#[macro_export]
macro_rules! assert_output_contains {
    ($result:expr, $pattern:expr) => {{
        let combined = $result.combined_output();
        assert!(
            combined.contains($pattern),
            "Expected output to contain: {}\nActual stdout:\n{}\nActual stderr:\n{}",
            $pattern,
            $result.stdout,
            $result.stderr
        );
    }};
}

/// List all files under a directory, relative and sorted
pub fn list_all_files(dir: &std::path::Path) -> Vec<String> {
    let mut files = Vec::new();
    collect(dir, dir, &mut files);
    files.sort();
    files
}

fn collect(root: &std::path::Path, dir: &std::path::Path, files: &mut Vec<String>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect(root, &path, files);
        } else if let Ok(rel) = path.strip_prefix(root) {
            files.push(rel.to_string_lossy().replace('\\', "/"));
        }
    }
}
