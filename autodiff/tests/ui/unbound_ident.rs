use autodiff::expr;

fn main() {
    let _f = expr!(|x| x + y);
}
