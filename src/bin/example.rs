use link_cut_forest::{DynamicForest, Forest};

fn add_cost(f: &mut Forest, u: usize, c: i64) {
    println!("Adding {c} to the path from {u} to its root");
    f.add_cost(u, c);
}

fn link(f: &mut Forest, t: usize, u: usize) {
    println!("Hanging the tree rooted at {t} below {u}");
    f.link(t, u);
}

fn cut(f: &mut Forest, u: usize) {
    println!("Cutting {u} from its parent");
    f.cut(u);
}

fn show(f: &mut Forest, u: usize) {
    let (v, c) = f.find_cost(u);
    println!(
        "Root of {u} is {}, cost of {u} is {}, cheapest node up to the root is {v} with cost {c}",
        f.find_root(u),
        f.cost(u),
    );
}

fn main() {
    let mut f = Forest::<i64>::new(5);
    add_cost(&mut f, 3, 10);
    link(&mut f, 3, 1);
    add_cost(&mut f, 3, 5);
    show(&mut f, 3);
    cut(&mut f, 3);
    show(&mut f, 3);
    show(&mut f, 1);
    link(&mut f, 2, 1);
    link(&mut f, 3, 2);
    link(&mut f, 4, 3);
    add_cost(&mut f, 4, 7);
    show(&mut f, 4);
    println!("Forest:\n{f}");
}
