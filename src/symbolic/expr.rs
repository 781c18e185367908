use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

use crate::core::{Error, Result};
use crate::symbolic::poly::{Atom, Monomial, Poly};
use crate::symbolic::symbol::Symbol;

/// Exact symbolic expression `scale * num / Π fᵢ^kᵢ`.
///
/// Invariants kept by every constructor:
/// - zero is `scale == 0` with `num == 1` and no denominator factors
/// - `num` is monic (leading coefficient 1)
/// - denominator factors are monic, non-constant, sorted and distinct;
///   monomial content is split into single-atom factors
///
/// Arithmetic keeps the representation combined over a common denominator
/// but only cancels single-atom factors. `cancel`, `trigsimp` and `simplify`
/// do the expensive work. Two expressions are symbolically equal iff
/// [`Expr::equivalent`] holds; structural equality is stricter.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Expr {
    scale: BigRational,
    num: Poly,
    den: Vec<(Poly, u32)>,
}

impl Expr {
    pub fn zero() -> Self {
        Expr {
            scale: BigRational::zero(),
            num: Poly::one(),
            den: Vec::new(),
        }
    }

    pub fn one() -> Self {
        Expr::int(1)
    }

    pub fn int(n: i64) -> Self {
        Expr::from_rational(BigRational::from_integer(BigInt::from(n)))
    }

    /// Exact rational constant `numer / denom`
    ///
    /// # Panics
    /// Panics if `denom` is zero.
    pub fn rational(numer: i64, denom: i64) -> Self {
        Expr::from_rational(BigRational::new(BigInt::from(numer), BigInt::from(denom)))
    }

    pub fn from_rational(value: BigRational) -> Self {
        if value.is_zero() {
            return Expr::zero();
        }
        Expr {
            scale: value,
            num: Poly::one(),
            den: Vec::new(),
        }
    }

    pub fn symbol(s: &Symbol) -> Self {
        Expr::from_atom(Atom::Sym(s.clone()))
    }

    pub(crate) fn from_atom(atom: Atom) -> Self {
        Expr::from_poly(Poly::from_atom(atom))
    }

    pub(crate) fn from_poly(num: Poly) -> Self {
        Expr::normalized(BigRational::one(), num, Vec::new())
    }

    /// Sine, with odd symmetry and integer multiples of the angle expanded:
    /// `sin(-u) = -sin(u)`, `sin(2u) = 2 sin(u) cos(u)`.
    pub fn sin(&self) -> Expr {
        let arg = self.simplify();
        if arg.is_zero() {
            return Expr::zero();
        }
        let (negative, n, base) = split_multiple(&arg);
        let (sin, _) = multiple_angle(&base, n);
        if negative { -sin } else { sin }
    }

    /// Cosine, with even symmetry and integer multiples of the angle expanded
    pub fn cos(&self) -> Expr {
        let arg = self.simplify();
        if arg.is_zero() {
            return Expr::one();
        }
        let (_, n, base) = split_multiple(&arg);
        multiple_angle(&base, n).1
    }

    /// Exponential, with `exp(-u) = 1/exp(u)` and `exp(n u) = exp(u)^n`
    pub fn exp(&self) -> Expr {
        let arg = self.simplify();
        if arg.is_zero() {
            return Expr::one();
        }
        let (negative, n, base) = split_multiple(&arg);
        let power = Poly::from_atom(Atom::Exp(Box::new(base)));
        if negative {
            Expr::normalized(BigRational::one(), Poly::one(), vec![(power, n)])
        } else {
            Expr::from_poly(power.pow(n))
        }
    }

    /// Structural zero test; run [`Expr::simplify`] first for a semantic one
    pub fn is_zero(&self) -> bool {
        self.scale.is_zero()
    }

    pub fn is_one(&self) -> bool {
        self.as_constant().map_or(false, |c| c.is_one())
    }

    pub fn as_constant(&self) -> Option<BigRational> {
        if !self.den.is_empty() {
            return None;
        }
        self.num.as_constant().map(|c| c * &self.scale)
    }

    pub(crate) fn scale(&self) -> &BigRational {
        &self.scale
    }

    pub(crate) fn numerator(&self) -> &Poly {
        &self.num
    }

    pub(crate) fn denominator(&self) -> &[(Poly, u32)] {
        &self.den
    }

    pub fn depends_on(&self, x: &Symbol) -> bool {
        self.num.depends_on(x) || self.den.iter().any(|(f, _)| f.depends_on(x))
    }

    pub fn pow(&self, n: u32) -> Expr {
        if n == 0 {
            return Expr::one();
        }
        if self.is_zero() {
            return Expr::zero();
        }
        let mut scale = BigRational::one();
        for _ in 0..n {
            scale = &scale * &self.scale;
        }
        Expr {
            scale,
            num: self.num.pow(n),
            den: self.den.iter().map(|(f, k)| (f.clone(), k * n)).collect(),
        }
    }

    /// Multiplicative inverse; fails if the expression simplifies to zero
    pub fn recip(&self) -> Result<Expr> {
        let value = self.simplify();
        if value.is_zero() {
            return Err(Error::DivisionByZero);
        }
        let mut num = Poly::one();
        for (factor, k) in &value.den {
            num = &num * &factor.pow(*k);
        }
        let mut scale = value.scale.recip();
        let mut den = Vec::new();
        push_denominator(&mut den, &mut scale, &value.num, 1);
        Ok(Expr::normalized(scale, num, den))
    }

    pub fn checked_div(&self, rhs: &Expr) -> Result<Expr> {
        Ok(self * &rhs.recip()?)
    }

    /// Partial derivative with respect to `x`
    pub fn diff(&self, x: &Symbol) -> Expr {
        if self.is_zero() || !self.depends_on(x) {
            return Expr::zero();
        }
        let base = Expr {
            scale: self.scale.clone(),
            num: Poly::one(),
            den: self.den.clone(),
        };
        let mut out = self.num.diff(x) * &base;
        let numerator = Expr::from_poly(self.num.clone());
        for (factor, k) in &self.den {
            let d_factor = factor.diff(x);
            if d_factor.is_zero() {
                continue;
            }
            let over_factor = Expr {
                scale: BigRational::one(),
                num: Poly::one(),
                den: vec![(factor.clone(), 1)],
            };
            out -= Expr::int(i64::from(*k)) * &numerator * d_factor * &base * over_factor;
        }
        out
    }

    /// Replaces every occurrence of `x` (including inside function arguments) by `value`
    pub fn subs(&self, x: &Symbol, value: &Expr) -> Result<Expr> {
        if !self.depends_on(x) {
            return Ok(self.clone());
        }
        let numerator = Expr::from_rational(self.scale.clone()) * self.num.subs(x, value)?;
        let mut denominator = Expr::one();
        for (factor, k) in &self.den {
            denominator = denominator * factor.subs(x, value)?.pow(*k);
        }
        numerator.checked_div(&denominator)
    }

    /// Coefficient of the monomial `Π sᵢ^eᵢ` in the numerator.
    ///
    /// Terms must carry the pattern symbols with exactly the given exponents;
    /// other atoms stay in the coefficient.
    pub fn coefficient(&self, pattern: &[(Symbol, u32)]) -> Result<Expr> {
        let tangled = self
            .den
            .iter()
            .any(|(f, _)| pattern.iter().any(|(s, _)| f.depends_on(s)));
        if tangled {
            return Err(Error::InvalidParameter(format!(
                "denominator of {} depends on the requested symbols",
                self
            )));
        }
        let mut collected = Poly::zero();
        for (m, c) in self.num.terms() {
            if let Some(rest) = m.strip_symbols(pattern) {
                collected.add_term(rest, c.clone());
            }
        }
        Ok(Expr::normalized(self.scale.clone(), collected, self.den.clone()))
    }

    /// Rational-term simplification: cancels every denominator factor that
    /// divides the numerator exactly.
    pub fn cancel(&self) -> Expr {
        let mut num = self.num.clone();
        let mut den = Vec::with_capacity(self.den.len());
        for (factor, k) in &self.den {
            let mut k = *k;
            while k > 0 {
                match num.div_exact(factor) {
                    Some(quot) => {
                        num = quot;
                        k -= 1;
                    }
                    None => break,
                }
            }
            if k > 0 {
                den.push((factor.clone(), k));
            }
        }
        Expr::normalized(self.scale.clone(), num, den)
    }

    /// Rewrites numerator and denominator factors into Pythagorean normal
    /// form (`cos(u)^2 -> 1 - sin(u)^2`) and cancels.
    pub fn trigsimp(&self) -> Expr {
        let num = self.num.trig_reduce();
        let mut scale = self.scale.clone();
        let mut den = Vec::with_capacity(self.den.len());
        for (factor, k) in &self.den {
            push_denominator(&mut den, &mut scale, &factor.trig_reduce(), *k);
        }
        Expr::normalized(scale, num, den).cancel()
    }

    /// General simplification.
    ///
    /// Zero detection is exact for rational functions of symbols, undefined
    /// functions and `sin`/`cos`/`exp` of a common argument, under the
    /// Pythagorean identity, odd/even symmetry and integer angle multiples.
    /// Angle sums (`sin(x + y)`), half angles and products `exp(a)·exp(b)` with
    /// unrelated arguments are not rewritten, so such identities may survive
    /// as a nonzero result.
    pub fn simplify(&self) -> Expr {
        self.trigsimp()
    }

    /// Symbolic equality: `(self - other)` simplifies to zero
    pub fn equivalent(&self, other: &Expr) -> bool {
        (self - other).simplify().is_zero()
    }

    /// Restores the invariants after a raw construction
    fn normalized(scale: BigRational, num: Poly, mut den: Vec<(Poly, u32)>) -> Expr {
        if scale.is_zero() || num.is_zero() {
            return Expr::zero();
        }
        let (lc, mut num) = num.monic();
        let scale = scale * lc;

        // single-atom denominator factors against the numerator's monomial content
        if den.iter().any(|(f, _)| f.as_atom().is_some()) {
            let content = num.monomial_content();
            if !content.is_one() {
                let mut cancelled = Monomial::one();
                let mut reduced = den.clone();
                for (factor, k) in reduced.iter_mut() {
                    if let Some(atom) = factor.as_atom() {
                        let shared = content.exponent(atom).min(*k);
                        if shared > 0 {
                            cancelled = &cancelled * &Monomial::from_atom(atom.clone(), shared);
                            *k -= shared;
                        }
                    }
                }
                if let Some(quot) = num.div_monomial(&cancelled) {
                    num = quot;
                    reduced.retain(|(_, k)| *k > 0);
                    den = reduced;
                }
            }
        }
        Expr { scale, num, den }
    }

    fn add_expr(&self, rhs: &Expr) -> Expr {
        if self.is_zero() {
            return rhs.clone();
        }
        if rhs.is_zero() {
            return self.clone();
        }
        let lcm = lcm_factors(&self.den, &rhs.den);
        let lhs_num = self.numerator_over(&lcm);
        let rhs_num = rhs.numerator_over(&lcm);
        Expr::normalized(BigRational::one(), &lhs_num + &rhs_num, lcm)
    }

    /// `scale * num` rewritten over the common denominator `lcm`
    fn numerator_over(&self, lcm: &[(Poly, u32)]) -> Poly {
        let mut p = self.num.scale(&self.scale);
        for (factor, l) in lcm {
            let k = self
                .den
                .binary_search_by(|(f, _)| f.cmp(factor))
                .map(|idx| self.den[idx].1)
                .unwrap_or(0);
            if *l > k {
                p = &p * &factor.pow(l - k);
            }
        }
        p
    }

    fn mul_expr(&self, rhs: &Expr) -> Expr {
        if self.is_zero() || rhs.is_zero() {
            return Expr::zero();
        }
        let mut den = self.den.clone();
        for (factor, k) in &rhs.den {
            insert_factor(&mut den, factor.clone(), *k);
        }
        Expr::normalized(&self.scale * &rhs.scale, &self.num * &rhs.num, den)
    }

    fn neg_expr(&self) -> Expr {
        Expr {
            scale: -&self.scale,
            num: self.num.clone(),
            den: self.den.clone(),
        }
    }
}

/// Largest integer multiple of an angle expanded by [`multiple_angle`]
const MAX_ANGLE_MULTIPLE: u32 = 32;

/// Splits a simplified nonzero argument `arg = ±n·base`, where `base` has
/// the positive scale `1/q`. Multiples above [`MAX_ANGLE_MULTIPLE`] stay in `base`.
fn split_multiple(arg: &Expr) -> (bool, u32, Expr) {
    let negative = arg.scale.is_negative();
    let magnitude = arg.scale.abs();
    let (n, scale) = match magnitude.numer().to_u32() {
        Some(n) if n <= MAX_ANGLE_MULTIPLE => {
            let unit = BigRational::new(BigInt::one(), magnitude.denom().clone());
            (n, unit)
        }
        _ => (1, magnitude),
    };
    let base = Expr {
        scale,
        num: arg.num.clone(),
        den: arg.den.clone(),
    };
    (negative, n, base)
}

/// `(sin(n·u), cos(n·u))` through the angle-addition formulas
fn multiple_angle(base: &Expr, n: u32) -> (Expr, Expr) {
    let sin = Expr::from_atom(Atom::Sin(Box::new(base.clone())));
    let cos = Expr::from_atom(Atom::Cos(Box::new(base.clone())));
    let (mut s, mut c) = (sin.clone(), cos.clone());
    for _ in 1..n {
        let next = &s * &cos + &c * &sin;
        c = &c * &cos - &s * &sin;
        s = next;
    }
    (s, c)
}

fn insert_factor(den: &mut Vec<(Poly, u32)>, factor: Poly, k: u32) {
    match den.binary_search_by(|(f, _)| f.cmp(&factor)) {
        Ok(idx) => den[idx].1 += k,
        Err(idx) => den.insert(idx, (factor, k)),
    }
}

/// Adds `p^k` to a denominator, splitting off monomial content and the
/// leading coefficient so the stored factors stay monic.
fn push_denominator(den: &mut Vec<(Poly, u32)>, scale: &mut BigRational, p: &Poly, k: u32) {
    if p.is_zero() || k == 0 {
        return;
    }
    let content = p.monomial_content();
    let rest = match p.div_monomial(&content) {
        Some(rest) if !content.is_one() => {
            for (atom, e) in content.factors() {
                insert_factor(den, Poly::from_atom(atom.clone()), e * k);
            }
            rest
        }
        _ => p.clone(),
    };
    let (lc, monic) = rest.monic();
    for _ in 0..k {
        *scale = &*scale / &lc;
    }
    if !monic.is_one() {
        insert_factor(den, monic, k);
    }
}

fn lcm_factors(a: &[(Poly, u32)], b: &[(Poly, u32)]) -> Vec<(Poly, u32)> {
    let mut out = a.to_vec();
    for (factor, k) in b {
        match out.binary_search_by(|(f, _)| f.cmp(factor)) {
            Ok(idx) => out[idx].1 = out[idx].1.max(*k),
            Err(idx) => out.insert(idx, (factor.clone(), *k)),
        }
    }
    out
}

macro_rules! forward_binop {
    ($imp:ident, $method:ident, $inner:ident) => {
        impl<'a, 'b> $imp<&'b Expr> for &'a Expr {
            type Output = Expr;

            fn $method(self, rhs: &'b Expr) -> Expr {
                self.$inner(rhs)
            }
        }

        impl $imp<Expr> for Expr {
            type Output = Expr;

            fn $method(self, rhs: Expr) -> Expr {
                (&self).$inner(&rhs)
            }
        }

        impl<'a> $imp<&'a Expr> for Expr {
            type Output = Expr;

            fn $method(self, rhs: &'a Expr) -> Expr {
                (&self).$inner(rhs)
            }
        }

        impl<'a> $imp<Expr> for &'a Expr {
            type Output = Expr;

            fn $method(self, rhs: Expr) -> Expr {
                self.$inner(&rhs)
            }
        }
    };
}

impl Expr {
    fn sub_expr(&self, rhs: &Expr) -> Expr {
        self.add_expr(&rhs.neg_expr())
    }
}

forward_binop!(Add, add, add_expr);
forward_binop!(Sub, sub, sub_expr);
forward_binop!(Mul, mul, mul_expr);

impl Neg for Expr {
    type Output = Expr;

    fn neg(self) -> Expr {
        self.neg_expr()
    }
}

impl<'a> Neg for &'a Expr {
    type Output = Expr;

    fn neg(self) -> Expr {
        self.neg_expr()
    }
}

impl AddAssign<Expr> for Expr {
    fn add_assign(&mut self, rhs: Expr) {
        *self = self.add_expr(&rhs);
    }
}

impl<'a> AddAssign<&'a Expr> for Expr {
    fn add_assign(&mut self, rhs: &'a Expr) {
        *self = self.add_expr(rhs);
    }
}

impl SubAssign<Expr> for Expr {
    fn sub_assign(&mut self, rhs: Expr) {
        *self = self.sub_expr(&rhs);
    }
}

impl Sum for Expr {
    fn sum<I: Iterator<Item = Expr>>(iter: I) -> Expr {
        iter.fold(Expr::zero(), |acc, e| acc + e)
    }
}

impl<'a> Sum<&'a Expr> for Expr {
    fn sum<I: Iterator<Item = &'a Expr>>(iter: I) -> Expr {
        iter.fold(Expr::zero(), |acc, e| acc + e)
    }
}

impl Zero for Expr {
    fn zero() -> Self {
        Expr::zero()
    }

    fn is_zero(&self) -> bool {
        Expr::is_zero(self)
    }
}

impl One for Expr {
    fn one() -> Self {
        Expr::one()
    }
}

impl Default for Expr {
    fn default() -> Self {
        Expr::zero()
    }
}

impl From<i64> for Expr {
    fn from(n: i64) -> Self {
        Expr::int(n)
    }
}

impl From<&Symbol> for Expr {
    fn from(s: &Symbol) -> Self {
        Expr::symbol(s)
    }
}

impl From<Symbol> for Expr {
    fn from(s: Symbol) -> Self {
        Expr::symbol(&s)
    }
}
