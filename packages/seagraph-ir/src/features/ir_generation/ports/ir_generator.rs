use crate::features::ast::Program;
use crate::features::ir_generation::infrastructure::GenerationResult;
use crate::features::ir_graph::IRModule;

pub trait ModuleGenerator: Send + Sync {
    fn generate(&self, program: &Program) -> GenerationResult<IRModule>;
}
