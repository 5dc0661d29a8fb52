pub mod ir_generator;

pub use ir_generator::ModuleGenerator;
