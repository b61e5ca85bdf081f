use crate::atom::Atom;
use fxhash::FxHashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Input,
    Output,
}

impl Direction {
    /// The Verilog declaration keyword.
    pub fn keyword(self) -> Atom {
        match self {
            Direction::Input => atom!("input"),
            Direction::Output => atom!("output"),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

/// A declared port and the name bdnet uses for it inside the module body.
#[derive(Debug, Clone)]
pub struct PortRecord {
    pub declared: Atom,
    pub equivalent: Atom,
}

/// Port records of one direction, in declaration order.
#[derive(Debug, Default)]
pub struct PortList {
    records: Vec<PortRecord>,
    by_equivalent: FxHashMap<Atom, usize>,
}

impl PortList {
    pub fn push(&mut self, declared: &str, equivalent: &str) {
        let rec = PortRecord {
            declared: Atom::from(declared),
            equivalent: Atom::from(equivalent),
        };
        // a repeated equivalent name resolves to the latest record
        self.by_equivalent
            .insert(rec.equivalent.clone(), self.records.len());
        self.records.push(rec);
    }

    pub fn lookup(&self, equivalent: &str) -> Option<&PortRecord> {
        self.by_equivalent
            .get(&Atom::from(equivalent))
            .map(|&i| &self.records[i])
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// A bus rebuilt from single-bit port names.
#[derive(Debug, Clone, PartialEq)]
pub struct Vector {
    pub base: Atom,
    pub dir: Direction,
    pub max: u32,
}

/// Buses of one module, in the order they were first seen.
#[derive(Debug, Default)]
pub struct VectorTracker {
    vectors: Vec<Vector>,
    index: FxHashMap<(Direction, Atom), usize>,
}

impl VectorTracker {
    /// Records bit `index` of bus `base`. Returns `true` if the bus was
    /// already known.
    pub fn observe(&mut self, dir: Direction, base: &str, index: u32) -> bool {
        let base = Atom::from(base);
        if let Some(&i) = self.index.get(&(dir, base.clone())) {
            let v = &mut self.vectors[i];
            v.max = v.max.max(index);
            return true;
        }
        self.index.insert((dir, base.clone()), self.vectors.len());
        self.vectors.push(Vector {
            base,
            dir,
            max: index,
        });
        false
    }

    pub fn iter(&self) -> impl Iterator<Item = &Vector> {
        self.vectors.iter()
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
}

/// Everything the translator knows about the module being written.
///
/// A fresh scope is created at every `MODEL` header.
#[derive(Debug, Default)]
pub struct ModuleScope {
    pub name: Atom,
    pub inputs: PortList,
    pub outputs: PortList,
    pub vectors: VectorTracker,
    pub instances: usize,
    /// The `module ... (` port list has been started but not closed.
    pub header_open: bool,
    ports_written: usize,
    input_decls: String,
    output_decls: String,
}

impl ModuleScope {
    pub fn new(name: &str) -> Self {
        ModuleScope {
            name: Atom::from(name),
            ..ModuleScope::default()
        }
    }

    pub fn ports_mut(&mut self, dir: Direction) -> &mut PortList {
        match dir {
            Direction::Input => &mut self.inputs,
            Direction::Output => &mut self.outputs,
        }
    }

    /// Separator to write before the next name in the module port list.
    pub fn next_port_separator(&mut self) -> &'static str {
        self.ports_written += 1;
        if self.ports_written == 1 {
            ""
        } else {
            ", "
        }
    }

    /// Queues `input name;` / `output name;` for the declaration section.
    pub fn declare(&mut self, dir: Direction, name: &str) {
        let decls = match dir {
            Direction::Input => &mut self.input_decls,
            Direction::Output => &mut self.output_decls,
        };
        decls.push_str(&format!("{} {};\n", dir, name));
    }

    /// Buffered scalar declarations, inputs first.
    pub fn declarations(&self) -> (&str, &str) {
        (&self.input_decls, &self.output_decls)
    }
}
