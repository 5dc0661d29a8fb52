use crate::errors::Result;
use crate::features::ast::Program;
use crate::features::ir_generation::ports::ModuleGenerator;
use crate::features::ir_graph::IRModule;

pub struct GenerateIRUseCase<G: ModuleGenerator> {
    generator: G,
}

impl<G: ModuleGenerator> GenerateIRUseCase<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    pub fn execute(&self, program: &Program) -> Result<IRModule> {
        Ok(self.generator.generate(program)?)
    }
}
