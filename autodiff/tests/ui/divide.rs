use autodiff::expr;

fn main() {
    let _f = expr!(|x| x / 2.0);
}
