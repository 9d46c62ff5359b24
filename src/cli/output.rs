use tabled::settings::Style;
use tabled::{Table, Tabled};

pub fn print_json(value: &serde_json::Value) {
    println!(
        "{}",
        serde_json::to_string_pretty(value).unwrap_or_default()
    );
}

pub fn render_table<T: Tabled>(data: &[T]) -> String {
    if data.is_empty() {
        return "No results.".to_string();
    }
    Table::new(data).with(Style::rounded()).to_string()
}

pub fn print_table<T: Tabled>(data: &[T]) {
    println!("{}", render_table(data));
}

pub fn print_error(err: &crate::error::AppError) {
    eprintln!(
        "{}",
        serde_json::to_string_pretty(&err.to_json()).unwrap_or_default()
    );
}
