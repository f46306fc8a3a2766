use std::path::{Path, PathBuf};

/// `dir/prog.bf` becomes `dir/prog.c`; a name without extension just gains
/// `.c`.
pub fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension("c")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_last_extension() {
        assert_eq!(default_output_path(Path::new("hello.bf")), PathBuf::from("hello.c"));
        assert_eq!(
            default_output_path(Path::new("dir/sub/prog.b.bf")),
            PathBuf::from("dir/sub/prog.b.c")
        );
    }

    #[test]
    fn adds_extension_when_missing() {
        assert_eq!(default_output_path(Path::new("dir/prog")), PathBuf::from("dir/prog.c"));
    }
}
