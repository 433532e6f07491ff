use tabled::builder::Builder;
use tabled::settings::{Padding, Style};

use crate::ui::widgets::TargetTable;

pub const TARGET_COLUMNS: [&str; 3] = ["configuration", "mix project", "mix test args"];
pub const UNSET_MIX_PROJECT: &str = "<none>";

/// Borderless `targets` listing, one row per runnable directory or file.
pub fn render_targets(table: &TargetTable) -> String {
    let mut builder = Builder::default();
    builder.push_record(TARGET_COLUMNS);
    for row in &table.rows {
        builder.push_record([
            row.configuration.as_str(),
            row.mix_project.as_deref().unwrap_or(UNSET_MIX_PROJECT),
            row.mix_test_args.as_str(),
        ]);
    }
    let mut rendered = builder.build();
    rendered.with(Style::blank());
    rendered.with(Padding::new(0, 2, 0, 0));
    rendered.to_string()
}
