use crate::ast::*;
use crate::value::parse_field_number;

use super::Interpreter;

impl<'a> Interpreter<'a> {
    /// Evaluate an expression against the current context.
    ///
    /// Fields that are missing or not numeric count as 0, and so does any
    /// division by zero.
    pub fn eval_expr(&self, expr: &Expr) -> f64 {
        match expr {
            Expr::Field(index) => parse_field_number(self.ctx.field(*index)),

            Expr::Var(name) => self.ctx.variable(name),

            Expr::Binary { left, op, right } => {
                let l = self.eval_expr(left);
                let r = self.eval_expr(right);
                match op {
                    BinaryOp::Add => l + r,
                    BinaryOp::Sub => l - r,
                    BinaryOp::Mul => l * r,
                    BinaryOp::Div => {
                        if r == 0.0 {
                            0.0
                        } else {
                            l / r
                        }
                    }
                }
            }
        }
    }
}
