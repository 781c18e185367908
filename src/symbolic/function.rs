use std::fmt;
use std::sync::Arc;

use crate::core::Result;
use crate::symbolic::expr::Expr;
use crate::symbolic::poly::Atom;
use crate::symbolic::symbol::Symbol;

/// Undefined function of the coordinates, e.g. a scale factor `a(t)` or a
/// redshift potential `Φ(r)`.
///
/// Nothing is assumed about it beyond differentiability: derivatives stay
/// symbolic and mixed partials commute.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Function(Arc<str>);

impl Function {
    pub fn new(name: &str) -> Self {
        Function(Arc::from(name))
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    /// The expression `f(args...)`
    pub fn call(&self, args: &[Expr]) -> Expr {
        let args: Vec<Expr> = args.iter().map(Expr::simplify).collect();
        Expr::from_atom(Atom::Func(Applied {
            func: self.clone(),
            orders: vec![0; args.len()],
            args,
        }))
    }
}

impl From<&str> for Function {
    fn from(name: &str) -> Self {
        Function::new(name)
    }
}

/// A function applied to arguments, carrying how often it has been
/// differentiated in each argument slot.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Applied {
    func: Function,
    orders: Vec<u32>,
    args: Vec<Expr>,
}

impl Applied {
    pub fn function(&self) -> &Function {
        &self.func
    }

    /// Derivative order per argument slot
    pub fn orders(&self) -> &[u32] {
        &self.orders
    }

    pub fn args(&self) -> &[Expr] {
        &self.args
    }

    pub fn depends_on(&self, x: &Symbol) -> bool {
        self.args.iter().any(|arg| arg.depends_on(x))
    }

    /// Chain rule: Σ_slot ∂_slot f(args) · ∂args[slot]/∂x
    pub(crate) fn diff(&self, x: &Symbol) -> Expr {
        let mut out = Expr::zero();
        for (slot, arg) in self.args.iter().enumerate() {
            let inner = arg.diff(x);
            if inner.is_zero() {
                continue;
            }
            let mut orders = self.orders.clone();
            orders[slot] += 1;
            let partial = Applied {
                func: self.func.clone(),
                orders,
                args: self.args.clone(),
            };
            out += Expr::from_atom(Atom::Func(partial)) * inner;
        }
        out
    }

    pub(crate) fn subs(&self, x: &Symbol, value: &Expr) -> Result<Expr> {
        let args = self
            .args
            .iter()
            .map(|arg| Ok(arg.subs(x, value)?.simplify()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Expr::from_atom(Atom::Func(Applied {
            func: self.func.clone(),
            orders: self.orders.clone(),
            args,
        })))
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// `a(t)`, `a'(t)`, `a''(t)`, `a^(4)(t)` and `f^(1,0)(x, y)` for partials
impl fmt::Display for Applied {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.func)?;
        match self.orders.as_slice() {
            orders if orders.iter().all(|k| *k == 0) => {}
            [k] if *k <= 3 => write!(f, "{}", "'".repeat(*k as usize))?,
            orders => {
                let orders: Vec<String> = orders.iter().map(u32::to_string).collect();
                write!(f, "^({})", orders.join(","))?;
            }
        }
        let args: Vec<String> = self.args.iter().map(Expr::to_string).collect();
        write!(f, "({})", args.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sym(name: &str) -> (Symbol, Expr) {
        let s = Symbol::new(name);
        let e = Expr::symbol(&s);
        (s, e)
    }

    #[test]
    fn test_derivative_orders_accumulate() {
        let (ts, t) = sym("t");
        let a = Function::new("a").call(&[t]);

        let a_dot = a.diff(&ts);
        let a_ddot = a_dot.diff(&ts);
        assert_eq!(a.to_string(), "a(t)");
        assert_eq!(a_dot.to_string(), "a'(t)");
        assert_eq!(a_ddot.to_string(), "a''(t)");
        assert_eq!(a_ddot.diff(&ts).diff(&ts).to_string(), "a^(4)(t)");
    }

    #[test]
    fn test_chain_rule_through_argument() {
        let (xs, x) = sym("x");
        let f = Function::new("f");
        let inner = x.pow(2);
        let composed = f.call(&[inner.clone()]);

        // d/dx f(x^2) = 2x f'(x^2)
        let (us, u) = sym("u");
        let f_prime = f.call(&[u]).diff(&us).subs(&us, &inner).unwrap();
        let expected = Expr::int(2) * &x * f_prime;
        assert!(composed.diff(&xs).equivalent(&expected));
    }

    #[test]
    fn test_mixed_partials_commute() {
        let (xs, x) = sym("x");
        let (ys, y) = sym("y");
        let f = Function::new("f").call(&[x, y]);

        let xy = f.diff(&xs).diff(&ys);
        let yx = f.diff(&ys).diff(&xs);
        assert_eq!(xy, yx);
        assert_eq!(xy.to_string(), "f^(1,1)(x, y)");
    }

    #[test]
    fn test_independent_variable_differentiates_to_zero() {
        let (_, t) = sym("t");
        let (rs, _) = sym("r");
        let a = Function::new("a").call(&[t]);
        assert!(a.diff(&rs).is_zero());
        assert!(!a.depends_on(&rs));
    }

    #[test]
    fn test_subs_into_arguments() {
        let (ts, t) = sym("t");
        let a = Function::new("a");
        let shifted = a.call(&[&t + &Expr::one()]);
        let replaced = a.call(&[t.clone()]).subs(&ts, &(&t + &Expr::one())).unwrap();
        assert_eq!(replaced, shifted);
    }

    #[test]
    fn test_function_and_exponential() {
        // d/dr exp(2Φ(r)) = 2Φ'(r) exp(2Φ(r))
        let (rs, r) = sym("r");
        let phi = Function::new("Φ").call(&[r]);
        let g = (Expr::int(2) * &phi).exp();
        let expected = Expr::int(2) * phi.diff(&rs) * &g;
        assert!(g.diff(&rs).equivalent(&expected));
    }
}
