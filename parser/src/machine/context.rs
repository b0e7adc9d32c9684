use cmdline_core::{ArgumentSpec, CommandNode, InputKind};

/// Mutable bookkeeping for one parse: the node being filled and the
/// positional slots it still expects.
#[derive(Debug, Clone)]
pub struct ParserContext<'t> {
    root: &'t CommandNode,
    current: &'t CommandNode,
    visited: Vec<&'t CommandNode>,
    remaining_inputs: Vec<&'t ArgumentSpec>,
}

impl<'t> ParserContext<'t> {
    pub fn new(root: &'t CommandNode) -> Self {
        Self {
            root,
            current: root,
            visited: Vec::new(),
            remaining_inputs: root.inputs().collect(),
        }
    }

    pub fn root(&self) -> &'t CommandNode {
        self.root
    }

    pub fn current(&self) -> &'t CommandNode {
        self.current
    }

    /// Nodes left behind by subcommand matches, oldest first.
    pub fn visited(&self) -> &[&'t CommandNode] {
        &self.visited
    }

    pub fn remaining_inputs(&self) -> &[&'t ArgumentSpec] {
        &self.remaining_inputs
    }

    /// Makes `node` current and expects its inputs from the start.
    pub fn enter(&mut self, node: &'t CommandNode) {
        self.visited.push(self.current);
        self.current = node;
        self.remaining_inputs = node.inputs().collect();
    }

    /// Takes the next positional slot. A variadic slot that is the last one
    /// left stays in place and keeps matching.
    pub fn take_input(&mut self) -> Option<&'t ArgumentSpec> {
        let input = *self.remaining_inputs.first()?;
        let keep = self.remaining_inputs.len() == 1
            && input.input_kind() == Some(InputKind::Variadic);
        if !keep {
            self.remaining_inputs.remove(0);
        }
        Some(input)
    }

    /// The first unfilled slot, if it must be filled.
    pub fn missing_required_input(&self) -> Option<&'t ArgumentSpec> {
        self.remaining_inputs
            .first()
            .copied()
            .filter(|input| input.input_kind() == Some(InputKind::Required))
    }
}
