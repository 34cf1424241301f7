use permfilter::FilterFields;

#[derive(FilterFields)]
struct User {
    #[filter(permission = 7)]
    email: String,
}

fn main() {}
