use std::io::{IsTerminal, Write};

use anstream::{AutoStream, ColorChoice};
use anstyle::Style;

use crate::ui::renderer::{Renderer, UiResult};
use crate::ui::table::render_targets;
use crate::ui::theme::{resolve_color_enabled, OutputMode, Theme};
use crate::ui::widgets::{DraftField, MessageBlock, NoticeLevel, TargetTable};

const UNSET_VALUE: &str = "<none>";

pub struct PlainRenderer<W: Write> {
    writer: W,
    color_enabled: bool,
    theme: Theme,
}

impl<W: Write> PlainRenderer<W> {
    pub fn new(writer: W, color_enabled: bool) -> Self {
        Self {
            writer,
            color_enabled,
            theme: Theme::default(),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn style_text(&self, style: Style, text: &str) -> String {
        if !self.color_enabled {
            return text.to_owned();
        }
        format!("{}{}{}", style.render(), text, style.render_reset())
    }
}

impl PlainRenderer<AutoStream<std::io::Stderr>> {
    pub fn stderr(mode: OutputMode) -> Self {
        let choice = match mode {
            OutputMode::Auto => ColorChoice::Auto,
            OutputMode::Always => ColorChoice::AlwaysAnsi,
            OutputMode::Never => ColorChoice::Never,
        };
        let stream = AutoStream::new(std::io::stderr(), choice);
        let color_enabled = resolve_color_enabled(mode, std::io::stderr().is_terminal());
        Self::new(stream, color_enabled)
    }
}

impl<W: Write> Renderer for PlainRenderer<W> {
    fn text(&mut self, body: &str) -> UiResult<()> {
        write!(self.writer, "{body}")?;
        if !body.ends_with('\n') {
            writeln!(self.writer)?;
        }
        Ok(())
    }

    fn section(&mut self, title: &str) -> UiResult<()> {
        let rendered = self.style_text(self.theme.heading, title);
        let underline = self.style_text(self.theme.rule, &"─".repeat(title.chars().count()));
        writeln!(self.writer, "{rendered}")?;
        writeln!(self.writer, "{underline}")?;
        Ok(())
    }

    fn notice(&mut self, level: NoticeLevel, body: &str) -> UiResult<()> {
        let (label, style) = match level {
            NoticeLevel::Info => ("info", self.theme.heading),
            NoticeLevel::Success => ("ok", self.theme.success),
            NoticeLevel::Warning => ("warn", self.theme.warning),
        };
        let marker = self.style_text(style, "•");
        let label = self.style_text(self.theme.rule, label);
        writeln!(self.writer, "{marker} {label}: {body}")?;
        Ok(())
    }

    fn error_block(&mut self, block: &MessageBlock) -> UiResult<()> {
        let marker = self.style_text(self.theme.error, "[error]");
        writeln!(self.writer, "{marker} {}", block.title)?;
        writeln!(self.writer, "  {}", block.body)?;
        if let Some(hint) = &block.hint {
            let hint_label = self.style_text(self.theme.rule, "hint");
            writeln!(self.writer, "  {hint_label}: {hint}")?;
        }
        Ok(())
    }

    fn configuration(&mut self, fields: &[DraftField]) -> UiResult<()> {
        let width = fields
            .iter()
            .map(|field| field.label.chars().count())
            .max()
            .unwrap_or(0);
        for field in fields {
            let padded = format!("{:width$}", field.label);
            let label = self.style_text(self.theme.field_label, &padded);
            let value = match &field.value {
                Some(value) => self.style_text(self.theme.field(field.role), value),
                None => self.style_text(self.theme.unset, UNSET_VALUE),
            };
            writeln!(self.writer, "{label}  {value}")?;
        }
        Ok(())
    }

    fn targets(&mut self, table: &TargetTable) -> UiResult<()> {
        let rendered = render_targets(table);
        writeln!(self.writer, "{rendered}")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::producer::RunConfiguration;
    use crate::ui::widgets::{configuration_fields, TargetRow};

    #[test]
    fn renders_error_block_without_color_when_disabled() {
        let mut renderer = PlainRenderer::new(Vec::<u8>::new(), false);

        renderer
            .error_block(
                &MessageBlock::new("Invalid command arguments", "--offset requires a value")
                    .with_hint("Run `mixrun --help` to see supported command forms"),
            )
            .expect("render error block");

        let rendered = String::from_utf8(renderer.into_inner()).expect("utf8");
        assert_eq!(
            rendered,
            "[error] Invalid command arguments\n  --offset requires a value\n  hint: Run `mixrun --help` to see supported command forms\n"
        );
    }

    #[test]
    fn aligns_configuration_fields_without_color_when_disabled() {
        let mut renderer = PlainRenderer::new(Vec::<u8>::new(), false);

        renderer.section("Run Configuration").expect("section");
        renderer
            .configuration(&configuration_fields(&RunConfiguration {
                name: "Mix ExUnit test".to_owned(),
                working_directory: None,
                program_parameters: "test".to_owned(),
            }))
            .expect("configuration");

        let rendered = String::from_utf8(renderer.into_inner()).expect("utf8");
        assert_eq!(
            rendered,
            "Run Configuration\n─────────────────\nname               Mix ExUnit test\nworking directory  <none>\nparameters         test\ncommand            mix test test\n"
        );
    }

    #[test]
    fn styles_working_directory_apart_from_parameters_when_enabled() {
        let mut renderer = PlainRenderer::new(Vec::<u8>::new(), true);
        let theme = Theme::default();
        renderer
            .configuration(&configuration_fields(&RunConfiguration {
                name: "Mix ExUnit foo test".to_owned(),
                working_directory: Some("/proj/apps/foo".to_owned()),
                program_parameters: "test".to_owned(),
            }))
            .expect("configuration");

        let rendered = String::from_utf8(renderer.into_inner()).expect("utf8");
        assert!(rendered.contains(&format!(
            "{}/proj/apps/foo{}",
            theme.working_directory.render(),
            theme.working_directory.render_reset()
        )));
        assert!(rendered.contains(&format!(
            "{}test{}",
            theme.parameters.render(),
            theme.parameters.render_reset()
        )));
    }

    #[test]
    fn renders_notice_and_targets_without_color_when_disabled() {
        let mut renderer = PlainRenderer::new(Vec::<u8>::new(), false);
        renderer
            .notice(NoticeLevel::Warning, "not a runnable test target")
            .expect("notice");
        renderer
            .targets(&TargetTable {
                rows: vec![TargetRow {
                    configuration: "Mix ExUnit test".to_owned(),
                    mix_project: Some(".".to_owned()),
                    mix_test_args: "test".to_owned(),
                }],
            })
            .expect("targets");

        let rendered = String::from_utf8(renderer.into_inner()).expect("utf8");
        assert!(rendered.starts_with("• warn: not a runnable test target\n"));
        assert!(rendered.contains("Mix ExUnit test"));
        assert!(rendered.contains("mix test args"));
    }
}
