use indicatif::{ProgressBar, ProgressStyle};

const TEMPLATE: &str = "{msg}: {percent:>3}%|{bar:40.cyan/blue}| {pos}/{len} [{elapsed_precise}<{eta}]";

/// Progress bar for one check pass. Hidden when progress display is off.
pub fn check_progress(len: usize, label: &str, enabled: bool) -> ProgressBar {
    if !enabled {
        return ProgressBar::hidden();
    }
    let style = ProgressStyle::default_bar()
        .template(TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉ ");
    let bar = ProgressBar::new(len as u64);
    bar.set_style(style);
    bar.set_message(label.to_string());
    bar
}
