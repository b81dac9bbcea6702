use std::collections::HashMap;

use tracing::trace;

use crate::{
    ir::ir::Program,
    types::entities::{EntityId, EntityTable},
};

const INDENT: &str = "    ";

pub struct Generator<'a> {
    entities: &'a EntityTable,
    names: HashMap<EntityId, String>,
    lines: Vec<String>,
    depth: usize,
}

impl<'a> Generator<'a> {
    pub fn new(entities: &'a EntityTable) -> Self {
        Generator {
            entities,
            names: HashMap::new(),
            lines: vec![],
            depth: 0,
        }
    }

    /// The output spelling of an entity.
    ///
    /// Intrinsics keep their target spelling. Any other entity is numbered in
    /// order of first use, starting at 1.
    pub fn name(&mut self, id: EntityId) -> String {
        let entities = self.entities;
        let entity = entities.get(id);
        if let Some(intrinsic) = entity.intrinsic() {
            return String::from(intrinsic);
        }

        let next = self.names.len() + 1;
        self.names
            .entry(id)
            .or_insert_with(|| format!("{}_{}", entity.name(), next))
            .clone()
    }

    pub(super) fn entities(&self) -> &'a EntityTable {
        self.entities
    }

    pub(super) fn line(&mut self, text: String) {
        self.lines.push(format!("{}{}", INDENT.repeat(self.depth), text));
    }

    pub(super) fn indent(&mut self) {
        self.depth += 1;
    }

    pub(super) fn dedent(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub fn finish(self) -> String {
        trace!("generated {} lines, {} names", self.lines.len(), self.names.len());
        self.lines.join("\n")
    }
}

pub fn generate(program: &Program) -> String {
    let mut generator = Generator::new(&program.entities);
    generator.emit_block(&program.statements);
    generator.finish()
}
