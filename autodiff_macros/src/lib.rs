#![deny(missing_docs)]
//! # autodiff_macros — procedural macros for expression trees
//!
//! This crate provides the **`expr!`** macro for the `autodiff`
//! library: it reads a one-parameter Rust closure and expands to the
//! code that builds the matching `autodiff::Expr` tree.
//!
//! ```ignore
//! use autodiff::expr;
//!
//! let f = expr!(|x| exp(x).powi(3) + cos(x) * x + pow(10, 2));
//! ```
//!
//! Variable scoping is checked at compile time: the closure parameter
//! is the only free variable, and any other identifier in the body is
//! rejected with a span pointing at it.
//!
//! This crate is **not** intended to be used directly. It is
//! re-exported through `autodiff` when the `macros` feature (on by
//! default) is enabled.
use proc_macro::TokenStream;
use proc_macro2::{Literal, TokenStream as TokenStream2};
use quote::quote;
use syn::parse_macro_input;
use syn::spanned::Spanned;
use syn::{BinOp, Expr, ExprClosure, Ident, Lit, Pat, Stmt, UnOp};

/// Build an `autodiff::Expr` from closure syntax.
///
/// The closure takes zero or one parameter; with zero the tree is
/// constant-valued. Supported body syntax:
///
/// - numeric literals and the parameter
/// - `a + b`, `a * b`, `a - b` (as `a + (-1) * b`), unary `-a`,
///   parentheses
/// - `pow(base, k)`, `base.powi(k)` and `base.pow(k)` for `Pow` nodes
/// - `name(arg)` and `arg.name()` for `Call` nodes; the name is looked
///   up in the evaluator's registry at run time
///
/// ```ignore
/// use autodiff::{evaluate, expr, Dual};
///
/// let f = expr!(|x| x.powi(2));
/// let y = evaluate(&f, Dual::new(2.0, 1.0)).unwrap();
/// assert_eq!((y.value, y.derivative), (4.0, 4.0));
/// ```
#[proc_macro]
pub fn expr(input: TokenStream) -> TokenStream {
    let closure = parse_macro_input!(input as ExprClosure);

    let expanded = free_variable(&closure).and_then(|var| lower(&closure.body, var.as_ref()));
    match expanded {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

/// The closure's parameter, if it has one.
fn free_variable(closure: &ExprClosure) -> syn::Result<Option<Ident>> {
    let mut params = closure.inputs.iter();
    let var = match params.next() {
        None => return Ok(None),
        Some(pat) => param_ident(pat)?,
    };
    if let Some(extra) = params.next() {
        let msg = "expr! supports a single free variable; remove the extra parameter";
        return Err(syn::Error::new_spanned(extra, msg));
    }
    Ok(Some(var))
}

fn param_ident(pat: &Pat) -> syn::Result<Ident> {
    match pat {
        Pat::Ident(p) if p.by_ref.is_none() && p.subpat.is_none() => Ok(p.ident.clone()),
        Pat::Type(p) => param_ident(&p.pat),
        other => Err(syn::Error::new_spanned(
            other,
            "expr! parameters must be plain identifiers",
        )),
    }
}

/// Lower one Rust expression to tree-building code.
fn lower(expr: &Expr, var: Option<&Ident>) -> syn::Result<TokenStream2> {
    match expr {
        Expr::Lit(_) => Ok(constant(literal_value(expr)?)),
        Expr::Paren(e) => lower(&e.expr, var),
        Expr::Group(e) => lower(&e.expr, var),
        Expr::Block(e) => match e.block.stmts.as_slice() {
            [Stmt::Expr(inner, None)] => lower(inner, var),
            _ => Err(syn::Error::new_spanned(
                e,
                "expr! blocks must contain a single expression",
            )),
        },
        Expr::Path(p) => match (p.path.get_ident(), var) {
            (Some(ident), Some(var)) if ident == var => Ok(quote!(::autodiff::Expr::variable())),
            (Some(ident), Some(var)) => Err(syn::Error::new_spanned(
                ident,
                format!("unbound variable `{ident}`: `{var}` is the only free variable"),
            )),
            (Some(ident), None) => Err(syn::Error::new_spanned(
                ident,
                format!("unbound variable `{ident}`: the closure has no parameter"),
            )),
            (None, _) => Err(syn::Error::new_spanned(p, "expected a variable name")),
        },
        Expr::Unary(e) => match e.op {
            UnOp::Neg(_) => match literal_value(&e.expr) {
                Ok(v) => Ok(constant(-v)),
                Err(_) => {
                    let inner = lower(&e.expr, var)?;
                    let minus_one = constant(-1.0);
                    Ok(quote!(::autodiff::Expr::mul(#minus_one, #inner)))
                }
            },
            _ => Err(syn::Error::new_spanned(e, "unsupported unary operator in expr!")),
        },
        Expr::Binary(e) => {
            let l = lower(&e.left, var)?;
            let r = lower(&e.right, var)?;
            match e.op {
                BinOp::Add(_) => Ok(quote!(::autodiff::Expr::add(#l, #r))),
                BinOp::Mul(_) => Ok(quote!(::autodiff::Expr::mul(#l, #r))),
                BinOp::Sub(_) => {
                    let minus_one = constant(-1.0);
                    Ok(quote!(::autodiff::Expr::add(#l, ::autodiff::Expr::mul(#minus_one, #r))))
                }
                _ => Err(syn::Error::new(
                    e.op.span(),
                    "unsupported operator in expr!; expected `+`, `-` or `*`",
                )),
            }
        }
        Expr::Call(e) => {
            let name = match &*e.func {
                Expr::Path(p) => p.path.get_ident().cloned(),
                _ => None,
            }
            .ok_or_else(|| syn::Error::new_spanned(&e.func, "expected a function name"))?;
            let fname = name.to_string();
            let args: Vec<&Expr> = e.args.iter().collect();
            match (fname.as_str(), args.as_slice()) {
                ("pow", [base, exponent]) => power(base, exponent, var),
                ("pow", _) => Err(syn::Error::new_spanned(
                    e,
                    "`pow` takes a base and an exponent",
                )),
                (_, [arg]) => call(&name, arg, var),
                _ => Err(syn::Error::new_spanned(
                    e,
                    format!("`{name}` must take exactly one argument"),
                )),
            }
        }
        Expr::MethodCall(e) => {
            let method = e.method.to_string();
            let args: Vec<&Expr> = e.args.iter().collect();
            match (method.as_str(), args.as_slice()) {
                ("powi" | "pow", [exponent]) => power(&e.receiver, exponent, var),
                (_, []) => call(&e.method, &e.receiver, var),
                _ => Err(syn::Error::new_spanned(
                    e,
                    "unsupported method call in expr!",
                )),
            }
        }
        other => Err(syn::Error::new_spanned(
            other,
            "unsupported expression in expr!",
        )),
    }
}

fn power(base: &Expr, exponent: &Expr, var: Option<&Ident>) -> syn::Result<TokenStream2> {
    let base = lower(base, var)?;
    let exponent = lower(exponent, var)?;
    Ok(quote!(::autodiff::Expr::pow(#base, #exponent)))
}

fn call(name: &Ident, arg: &Expr, var: Option<&Ident>) -> syn::Result<TokenStream2> {
    let name = name.to_string();
    let arg = lower(arg, var)?;
    Ok(quote!(::autodiff::Expr::call(#name, #arg)))
}

fn constant(v: f64) -> TokenStream2 {
    let lit = Literal::f64_suffixed(v.abs());
    if v.is_sign_negative() {
        quote!(::autodiff::Expr::constant(-#lit))
    } else {
        quote!(::autodiff::Expr::constant(#lit))
    }
}

/// The value of a numeric literal, possibly parenthesized.
fn literal_value(expr: &Expr) -> syn::Result<f64> {
    let value = match expr {
        Expr::Lit(e) => match &e.lit {
            Lit::Int(lit) => lit.base10_parse::<u64>()? as f64,
            Lit::Float(lit) => lit.base10_parse::<f64>()?,
            other => {
                return Err(syn::Error::new_spanned(
                    other,
                    "expr! literals must be numeric",
                ))
            }
        },
        Expr::Paren(e) => literal_value(&e.expr)?,
        Expr::Group(e) => literal_value(&e.expr)?,
        other => return Err(syn::Error::new_spanned(other, "expected a numeric literal")),
    };
    if value.is_finite() {
        Ok(value)
    } else {
        Err(syn::Error::new_spanned(expr, "numeric literal out of range"))
    }
}
