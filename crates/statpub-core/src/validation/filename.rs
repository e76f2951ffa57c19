/// Marker substring that designates a metadata filename.
pub const META_FILENAME_MARKER: &str = ".meta.";

/// Characters rejected in uploaded filenames: spaces, ampersands, and the
/// OS-reserved set.
const ILLEGAL_FILENAME_CHARACTERS: &[char] =
    &[' ', '&', '<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Characters rejected in subject names. Spaces are allowed; path and markup
/// characters are not.
const RESERVED_SUBJECT_NAME_CHARACTERS: &[char] =
    &['&', '<', '>', ':', '"', '\'', '/', '\\', '|', '?', '*'];

/// True when the filename contains a space, an ampersand, an OS-reserved
/// character, or a control character.
pub fn filename_has_illegal_characters(filename: &str) -> bool {
    filename
        .chars()
        .any(|c| c.is_control() || ILLEGAL_FILENAME_CHARACTERS.contains(&c))
}

/// Case-insensitive `.csv` extension check. This is a naming rule only;
/// content classification is done separately by sniffing.
pub fn has_csv_extension(filename: &str) -> bool {
    filename.to_lowercase().ends_with(".csv")
}

/// True when the filename carries the `.meta.` marker.
pub fn is_meta_filename(filename: &str) -> bool {
    filename.contains(META_FILENAME_MARKER)
}

/// True when a proposed subject name contains a reserved character.
pub fn subject_name_has_reserved_characters(name: &str) -> bool {
    name.chars()
        .any(|c| c.is_control() || RESERVED_SUBJECT_NAME_CHARACTERS.contains(&c))
}
