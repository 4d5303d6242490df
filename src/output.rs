//! Output formatting for outbound engine events

use crate::events::Event;
use crate::index::build::DataIndex;
use crate::index::types::ItemId;
use crate::query::composer::ResultBatch;
use crate::query::options::OptionsUpdate;
use rustc_hash::FxHashMap;
use std::io::{self, Write};
use termcolor::{Color, ColorSpec, WriteColor};

/// Number of selectable values shown per facet before eliding the rest
const SHOWN_OPTIONS: usize = 8;

/// Writes outbound events either as colored text or as JSON lines
pub struct EventPrinter<W> {
    out: W,
    names: FxHashMap<ItemId, String>,
    json: bool,
}

impl<W: WriteColor> EventPrinter<W> {
    /// Printer resolving item names from `index`
    pub fn new(out: W, index: &DataIndex, json: bool) -> Self {
        let names = index
            .items()
            .iter()
            .map(|item| (item.id, item.name.clone()))
            .collect();
        Self { out, names, json }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn print(&mut self, event: &Event) -> io::Result<()> {
        if self.json {
            serde_json::to_writer(&mut self.out, event)?;
            return writeln!(self.out);
        }

        match event {
            Event::ResultChanged(batch) => self.print_batch(batch),
            Event::OptionsChanged(options) => self.print_options(options),
            Event::CountChanged(update) => {
                self.label("count")?;
                self.out.set_color(ColorSpec::new().set_bold(true))?;
                writeln!(self.out, "{}", update.count)?;
                self.out.reset()
            }
            inbound => {
                self.label(inbound.topic().as_str())?;
                writeln!(self.out, "{}", serde_json::to_string(inbound)?)
            }
        }
    }

    fn label(&mut self, name: &str) -> io::Result<()> {
        self.out
            .set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true))?;
        write!(self.out, "{:8}", name)?;
        self.out.reset()
    }

    fn print_batch(&mut self, batch: &ResultBatch) -> io::Result<()> {
        self.label("result")?;
        write!(self.out, "{} item(s)", batch.items.len())?;
        if batch.partial {
            self.out.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
            write!(self.out, " [partial]")?;
            self.out.reset()?;
        } else if batch.preceded_by_partial {
            self.out.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
            write!(self.out, " [rest]")?;
            self.out.reset()?;
        }
        writeln!(self.out)?;

        for id in &batch.items {
            self.out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
            write!(self.out, "  {:>6}", id)?;
            self.out.reset()?;
            let name = self.names.get(id).map_or("", String::as_str);
            writeln!(self.out, "  {}", name)?;
        }
        Ok(())
    }

    fn print_options(&mut self, options: &OptionsUpdate) -> io::Result<()> {
        self.label("options")?;
        writeln!(self.out)?;

        for (facet, facet_options) in options {
            write!(self.out, "  {:12}", facet.as_str())?;
            for tag in &facet_options.selected {
                self.out
                    .set_color(ColorSpec::new().set_fg(Some(Color::Magenta)).set_bold(true))?;
                write!(self.out, "[{}] ", tag)?;
                self.out.reset()?;
            }

            let shown: Vec<&str> = facet_options
                .selectable
                .iter()
                .take(SHOWN_OPTIONS)
                .map(String::as_str)
                .collect();
            write!(self.out, "{}", shown.join(", "))?;
            if facet_options.selectable.len() > SHOWN_OPTIONS {
                write!(
                    self.out,
                    " ... and {} more",
                    facet_options.selectable.len() - SHOWN_OPTIONS
                )?;
            }
            writeln!(self.out)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::CountUpdate;
    use crate::index::load::parse_items;
    use termcolor::Buffer;

    fn index() -> DataIndex {
        let items = parse_items(
            r#"[
                {"id": 4, "name": "Crumble", "appliance": "Four"},
                {"id": 8, "name": "Smoothie", "appliance": "Blender"}
            ]"#,
        )
        .unwrap();
        DataIndex::build(items).unwrap()
    }

    fn render(json: bool, events: &[Event]) -> String {
        let mut printer = EventPrinter::new(Buffer::no_color(), &index(), json);
        for event in events {
            printer.print(event).unwrap();
        }
        String::from_utf8(printer.into_inner().into_inner()).unwrap()
    }

    #[test]
    fn test_print_batch_with_names() {
        let text = render(
            false,
            &[Event::ResultChanged(ResultBatch {
                items: vec![4, 8],
                partial: true,
                preceded_by_partial: false,
            })],
        );
        assert!(text.starts_with("result  2 item(s) [partial]\n"));
        assert!(text.contains("       4  Crumble\n"));
        assert!(text.contains("       8  Smoothie\n"));
    }

    #[test]
    fn test_print_count() {
        let text = render(false, &[Event::CountChanged(CountUpdate { count: 12 })]);
        assert_eq!(text, "count   12\n");
    }

    #[test]
    fn test_json_lines() {
        let text = render(
            true,
            &[
                Event::CountChanged(CountUpdate { count: 1 }),
                Event::text_search("choc"),
            ],
        );
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(
            lines,
            [
                r#"{"topic":"count-changed","payload":{"count":1}}"#,
                r#"{"topic":"text-search","payload":{"query":"choc"}}"#,
            ]
        );
    }
}
