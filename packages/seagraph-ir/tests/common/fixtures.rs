//! Program fixtures
//!
//! Each fixture returns the AST plus the symbols a test needs to inspect
//! the generated graph.

use seagraph_ir::config::{GeneratorConfig, Preset};
use seagraph_ir::features::ast::{AstBuilder, FunctionDecl, Statement};
use seagraph_ir::features::ir_graph::{Graph, IRModule};
use seagraph_ir::shared::models::{Op, Span, StaticType, VarSymbol};
use seagraph_ir::{IRGenerator, Program};

type B = AstBuilder;

/// Generate one function on its own and return its graph
pub fn generate_function(decl: &FunctionDecl, config: GeneratorConfig) -> Graph {
    let mut generator = IRGenerator::new(config);
    generator.generate_function(decl).expect("generation succeeds");
    let module = generator.into_module();
    module
        .graph(decl.sym.id)
        .cloned()
        .expect("function registered in module")
}

pub fn generate_program(program: &Program, config: GeneratorConfig) -> IRModule {
    IRGenerator::new(config)
        .generate_program(program)
        .expect("generation succeeds")
}

pub fn reference() -> GeneratorConfig {
    GeneratorConfig::preset(Preset::Reference)
}

/// `f(cond) { var x = 1; if (cond) { x = 2; } return x; }`
pub fn scenario_if_without_else() -> FunctionDecl {
    let mut b = AstBuilder::new();
    let cond = b.var("cond", StaticType::Boolean);
    let x = b.var("x", StaticType::Integer);
    b.function(
        "f",
        vec![cond.clone()],
        vec![
            B::declare(&x, Some(B::int(1))),
            B::if_else(B::read(&cond), vec![B::assign(&x, B::int(2))], None),
            B::ret(Some(B::read(&x))),
        ],
    )
}

/// Top-level `return 1 + 2;`
pub fn scenario_constant_sum() -> Program {
    let mut b = AstBuilder::new();
    b.program(vec![B::ret(Some(B::binary(Op::Plus, B::int(1), B::int(2))))])
}

/// `f(a) { var y = a + 5; var z = a * 5; return y - z; }`
pub fn scenario_shared_literal() -> FunctionDecl {
    let mut b = AstBuilder::new();
    let a = b.var("a", StaticType::Integer);
    let y = b.var("y", StaticType::Integer);
    let z = b.var("z", StaticType::Integer);
    b.function(
        "f",
        vec![a.clone()],
        vec![
            B::declare(&y, Some(B::binary(Op::Plus, B::read(&a), B::int(5)))),
            B::declare(&z, Some(B::binary(Op::Multiply, B::read(&a), B::int(5)))),
            B::ret(Some(B::binary(Op::Minus, B::read(&y), B::read(&z)))),
        ],
    )
}

/// `f(c) { var x = 1; if (c) { x = 2; } else { x = 3; } var y = x; var z = x; return y + z; }`
pub fn scenario_if_else_double_read() -> FunctionDecl {
    let mut b = AstBuilder::new();
    let c = b.var("c", StaticType::Boolean);
    let x = b.var("x", StaticType::Integer);
    let y = b.var("y", StaticType::Integer);
    let z = b.var("z", StaticType::Integer);
    b.function(
        "f",
        vec![c.clone()],
        vec![
            B::declare(&x, Some(B::int(1))),
            B::if_else(
                B::read(&c),
                vec![B::assign(&x, B::int(2))],
                Some(vec![B::assign(&x, B::int(3))]),
            ),
            B::declare(&y, Some(B::read(&x))),
            B::declare(&z, Some(B::read(&x))),
            B::ret(Some(B::binary(Op::Plus, B::read(&y), B::read(&z)))),
        ],
    )
}

/// `f(n) { var i = 0; var s = 0; while (i < n) { s = s + i; i = i + 1; } return s; }`
pub fn scenario_counting_loop() -> FunctionDecl {
    let mut b = AstBuilder::new();
    let n = b.var("n", StaticType::Integer);
    let i = b.var("i", StaticType::Integer);
    let s = b.var("s", StaticType::Integer);
    b.function(
        "f",
        vec![n.clone()],
        vec![
            B::declare(&i, Some(B::int(0))),
            B::declare(&s, Some(B::int(0))),
            B::while_loop(
                B::binary(Op::L, B::read(&i), B::read(&n)),
                vec![
                    B::assign(&s, B::binary(Op::Plus, B::read(&s), B::read(&i))),
                    B::assign(&i, B::binary(Op::Plus, B::read(&i), B::int(1))),
                ],
            ),
            B::ret(Some(B::read(&s))),
        ],
    )
}

/// Function whose body reads `ghost` at `span` without ever defining it
pub fn scenario_unresolved(span: Span) -> (FunctionDecl, VarSymbol) {
    let mut b = AstBuilder::new();
    let ghost = b.var("ghost", StaticType::Integer);
    let decl = b.function("f", vec![], vec![B::ret(Some(B::read_at(&ghost, span)))]);
    (decl, ghost)
}

/// Program with `count` top-level functions, each a small branchy body
pub fn scenario_many_functions(count: usize) -> Program {
    let mut b = AstBuilder::new();
    let mut body: Vec<Statement> = Vec::new();
    for i in 0..count {
        let p = b.var("p", StaticType::Integer);
        let x = b.var("x", StaticType::Integer);
        let decl = b.function(
            &format!("f{i}"),
            vec![p.clone()],
            vec![
                B::declare(&x, Some(B::int(i as i64))),
                B::if_else(
                    B::binary(Op::G, B::read(&p), B::int(0)),
                    vec![B::assign(&x, B::binary(Op::Plus, B::read(&x), B::read(&p)))],
                    None,
                ),
                B::ret(Some(B::read(&x))),
            ],
        );
        body.push(Statement::FunctionDecl(decl));
    }
    body.push(B::ret(None));
    b.program(body)
}
