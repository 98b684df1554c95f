pub struct FileSizeUtils;

impl FileSizeUtils {
    /// Two decimals at most, trailing zeros dropped: "0 Bytes", "1.5 KB", "2 MB".
    pub fn format_size(size: u64) -> String {
        const UNITS: [&str; 3] = ["Bytes", "KB", "MB"];
        if size == 0 {
            return "0 Bytes".to_string();
        }

        let mut size = size as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        let rounded = format!("{:.2}", size);
        let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
        format!("{} {}", trimmed, UNITS[unit_index])
    }
}
