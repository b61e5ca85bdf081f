use crate::error::{Error, Result};
use crate::names;
use crate::record::{self, Keyword};
use crate::scanner::{Line, LineScanner};
use crate::scope::{Direction, ModuleScope};
use log::{debug, trace, warn};
use std::io::{BufRead, Write};

/// Translation switches.
#[derive(Debug, Clone)]
pub struct Options {
    /// Add `VSS`/`VDD` to every module port list and instance.
    pub implicit_power: bool,
    /// Keep instance cell names as written instead of lower-casing them.
    pub preserve_case: bool,
    /// Fail on unreadable lines inside INPUT/OUTPUT/INSTANCE blocks instead
    /// of skipping them.
    pub strict: bool,
    /// Longer input lines are truncated.
    pub max_line_len: usize,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            implicit_power: true,
            preserve_case: false,
            strict: false,
            max_line_len: 1024,
        }
    }
}

/// An entry read from inside a list block.
struct Entry {
    line: usize,
    name: String,
    value: String,
    last: bool,
}

/// Streams a bdnet netlist into Verilog in one forward pass.
pub struct Translator<R, W> {
    scanner: LineScanner<R>,
    out: W,
    opts: Options,
    scope: ModuleScope,
}

impl<R: BufRead, W: Write> Translator<R, W> {
    pub fn new(input: R, out: W, opts: Options) -> Self {
        Translator {
            scanner: LineScanner::new(input, opts.max_line_len),
            out,
            opts,
            scope: ModuleScope::default(),
        }
    }

    /// Translates the whole input.
    pub fn run(&mut self) -> Result<()> {
        while let Some(line) = self.scanner.next_line()? {
            self.dispatch(&line)?;
        }
        self.out.flush()?;
        debug!("read {} lines", self.scanner.line_number());
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn dispatch(&mut self, line: &Line) -> Result<()> {
        match record::classify(&line.text) {
            Some(Keyword::Model) => self.begin_module(line),
            Some(Keyword::EndModel) => self.end_module(),
            Some(Keyword::Input) => self.port_list(Direction::Input),
            Some(Keyword::Output) => {
                self.port_list(Direction::Output)?;
                self.close_header()
            }
            Some(Keyword::Instance) => self.instance(line),
            None => {
                trace!("line {}: ignored", line.number);
                Ok(())
            }
        }
    }

    fn begin_module(&mut self, line: &Line) -> Result<()> {
        let raw = record::keyword_arg(Keyword::Model, &line.text).unwrap_or_default();
        let name = names::cleanup(names::strip_terminator(raw));
        debug!("line {}: module {}", line.number, name);

        self.scope = ModuleScope::new(&name);
        self.scope.header_open = true;

        write!(self.out, "module {} (", name)?;
        if self.opts.implicit_power {
            write!(self.out, " {}, {}, ", atom!("VSS"), atom!("VDD"))?;
        }
        Ok(())
    }

    fn end_module(&mut self) -> Result<()> {
        self.close_header()?;
        writeln!(self.out, "endmodule")?;
        debug!(
            "end of module {}: {} inputs, {} outputs, {} buses, {} instances",
            self.scope.name,
            self.scope.inputs.len(),
            self.scope.outputs.len(),
            self.scope.vectors.len(),
            self.scope.instances,
        );
        Ok(())
    }

    /// Reads the next `name : value` entry of the current block.
    ///
    /// Returns `None` at an empty line, at end of input, or at a line that
    /// opens another record, which is handed back to the dispatcher. Lines
    /// holding only spaces or tabs are skipped.
    fn next_entry(&mut self) -> Result<Option<Entry>> {
        while let Some(line) = self.scanner.next_line()? {
            if line.is_blank() {
                return Ok(None);
            }
            if line.text.trim().is_empty() {
                trace!("line {}: whitespace only", line.number);
                continue;
            }
            if let Some(rec) = record::parse_record(&line.text) {
                return Ok(Some(Entry {
                    line: line.number,
                    name: rec.name.to_string(),
                    value: rec.value.to_string(),
                    last: rec.is_last(),
                }));
            }
            if record::classify(&line.text).is_some() {
                self.scanner.push_back(line);
                return Ok(None);
            }
            if self.opts.strict {
                return Err(Error::UnmatchedRecord {
                    line: line.number,
                    text: line.text,
                });
            }
            debug!("line {}: skipping `{}`", line.number, line.text);
        }
        Ok(None)
    }

    fn port_list(&mut self, dir: Direction) -> Result<()> {
        if !self.scope.header_open {
            warn!(
                "line {}: {} list outside an open module header, ports are not declared",
                self.scanner.line_number(),
                dir
            );
        }

        while let Some(entry) = self.next_entry()? {
            let name = names::cleanup(&entry.name);
            let equivalent = names::cleanup(names::strip_terminator(&entry.value));
            self.scope.ports_mut(dir).push(&name, &equivalent);

            // Bus bits are declared once, as a range, when the header closes.
            let (port, scalar) = match names::split_index(&name, entry.line)? {
                Some((base, index)) => {
                    let known = self.scope.vectors.observe(dir, base, index);
                    (if known { None } else { Some(base) }, false)
                }
                None => (Some(name.as_str()), true),
            };

            if let Some(port) = port {
                if self.scope.header_open {
                    let sep = self.scope.next_port_separator();
                    write!(self.out, "{}{}", sep, port)?;
                }
            }
            if scalar {
                self.scope.declare(dir, &name);
            }

            if entry.last {
                break;
            }
        }
        Ok(())
    }

    /// Ends the port list and writes the declaration section.
    fn close_header(&mut self) -> Result<()> {
        if !self.scope.header_open {
            return Ok(());
        }
        self.scope.header_open = false;

        writeln!(self.out, ");")?;
        if self.opts.implicit_power {
            write!(self.out, "input {}, {}; ", atom!("VSS"), atom!("VDD"))?;
        }
        let (inputs, outputs) = self.scope.declarations();
        write!(self.out, "{}{}", inputs, outputs)?;
        for v in self.scope.vectors.iter() {
            writeln!(self.out, "{} [{}:0] {};", v.dir, v.max, v.base)?;
        }
        Ok(())
    }

    fn instance(&mut self, line: &Line) -> Result<()> {
        self.close_header()?;
        self.scope.instances += 1;

        let raw = match record::keyword_arg(Keyword::Instance, &line.text) {
            Some(raw) => raw,
            None => {
                debug!("line {}: INSTANCE without a cell name", line.number);
                return Ok(());
            }
        };
        let mut cell = names::cleanup(raw);
        if let Some(colon) = cell.find(':') {
            cell.truncate(colon);
        }
        if !self.opts.preserve_case {
            cell.make_ascii_lowercase();
        }
        debug!("line {}: instance u{} of {}", line.number, self.scope.instances, cell);

        write!(self.out, "\t{} u{} ( ", cell, self.scope.instances)?;
        if self.opts.implicit_power {
            write!(
                self.out,
                ".{0}({0}), .{1}({1}), ",
                atom!("VSS"),
                atom!("VDD")
            )?;
        }

        let mut first = true;
        while let Some(entry) = self.next_entry()? {
            let port = names::cleanup(&entry.name);
            let wire = self.resolve_wire(&names::cleanup(names::strip_terminator(&entry.value)));
            write!(
                self.out,
                "{}.{}({})",
                if first { "" } else { ", " },
                port,
                wire
            )?;
            first = false;
        }
        writeln!(self.out, " );")?;
        Ok(())
    }

    /// Maps a connection back to a module port, or makes an internal net name
    /// legal in Verilog.
    ///
    /// The output list is searched with the name the input list produced.
    fn resolve_wire(&self, wire: &str) -> String {
        let mut resolved: Option<String> = None;
        if let Some(port) = self.scope.inputs.lookup(wire) {
            resolved = Some(names::cut_after_select(&port.declared).to_string());
        }
        let current = resolved.as_deref().unwrap_or(wire);
        if let Some(port) = self.scope.outputs.lookup(current) {
            resolved = Some(names::cut_after_select(&port.declared).to_string());
        }
        names::prefix_digit(resolved.unwrap_or_else(|| names::sanitize_internal(wire)))
    }
}

/// Translates `input` to `out`.
pub fn translate<R: BufRead, W: Write>(input: R, out: W, opts: &Options) -> Result<()> {
    Translator::new(input, out, opts.clone()).run()
}

/// Translates a whole netlist held in memory.
pub fn translate_str(s: &str, opts: &Options) -> Result<String> {
    let mut t = Translator::new(s.as_bytes(), Vec::new(), opts.clone());
    t.run()?;
    Ok(String::from_utf8_lossy(&t.into_inner()).into_owned())
}
