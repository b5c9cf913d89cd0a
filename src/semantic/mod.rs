pub mod resolver;
pub mod scope_info;
pub mod symboltable;
pub mod visiters;

pub use resolver::{resolve, ResolvedProgram, Resolver};
pub use scope_info::ScopeInfo;
pub use symboltable::{ProcId, Symbol, SymbolTable, SymbolType};
pub use visiters::ASTVisitor;
