use partial_fs::NormalizedPath;
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_normalized_paths_have_no_backslashes(s in "\\PC*") {
        let path = NormalizedPath::new(&s);
        prop_assert!(!path.as_str().contains('\\'));

        let roundtripped = NormalizedPath::new(path.to_native());
        prop_assert_eq!(path, roundtripped);
    }

    #[test]
    fn test_join_keeps_file_name(dir in "[a-z]{1,8}", file in "[a-z]{1,8}\\.html") {
        let joined = NormalizedPath::new(&dir).join(&file);
        prop_assert_eq!(joined.file_name(), Some(file.as_str()));
        prop_assert_eq!(joined.leading_dir(), Some(dir.as_str()));
    }
}
