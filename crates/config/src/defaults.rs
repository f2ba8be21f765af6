// Defaults for palette configuration

pub(crate) const PLACEHOLDER: &str = "Type a command or search...";
pub(crate) const HOTKEY: &str = "cmd+k";
pub(crate) const MAX_RESULTS: usize = 8;
pub(crate) const EMPTY_MESSAGE: &str = "No results found.";
pub(crate) const CLOSE_ON_SELECT: bool = true;

// Serde default functions
pub(crate) fn default_placeholder() -> String {
    PLACEHOLDER.to_string()
}
pub(crate) fn default_hotkey() -> String {
    HOTKEY.to_string()
}
pub(crate) const fn default_max_results() -> usize {
    MAX_RESULTS
}
pub(crate) fn default_empty_message() -> String {
    EMPTY_MESSAGE.to_string()
}
pub(crate) const fn default_close_on_select() -> bool {
    CLOSE_ON_SELECT
}
