/*
*                    pl0vm -- PL/0 compiler and virtual machine.
*
* program   = "program" ident ";" block "." ;
* block     = [ "const" ident "=" integer { "," ident "=" integer } ";" ]
*             [ "var" ident { "," ident } ";" ]
*             { procedure } statement ;
* procedure = "procedure" ident "(" [ ident { "," ident } ] ")" ";" block { ";" procedure } ;
* statement = ident ":=" expr
*           | "if" condition "then" statement [ "else" statement ]
*           | "while" condition "do" statement
*           | "call" ident [ "(" [ expr { "," expr } ] ")" ]
*           | "read" "(" ident { "," ident } ")"
*           | "write" "(" expr { "," expr } ")"
*           | "begin" statement { ";" statement } "end" ;
* condition = expr relop expr | "odd" expr ;
* expr      = [ "+" | "-" ] term { ( "+" | "-" ) term } ;
* term      = factor { ( "*" | "/" ) factor } ;
* factor    = ident | integer | "(" expr ")" ;
* relop     = "=" | "<>" | "<" | "<=" | ">" | ">=" ;
*/

use crate::errors::Pl0Result;
use crate::semantic::visiters::ASTVisitor;
use crate::Position;

pub trait Node {
    fn accept(&self, visitor: &mut dyn ASTVisitor) -> Pl0Result<()>;
    fn position(&self) -> Position;
}
