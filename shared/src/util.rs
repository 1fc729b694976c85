//! Time helpers

/// Timestamp layout used on every stored record.
///
/// Fixed width and zero padded, so lexicographic order over the strings is
/// chronological order. The store's order-by relies on this.
pub const STAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Current local time in the stored-record format.
pub fn now_stamp() -> String {
    chrono::Local::now().format(STAMP_FORMAT).to_string()
}
