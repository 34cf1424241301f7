use permfilter::FilterFields;

#[derive(FilterFields)]
struct User {
    #[filter(permission = "user.email")]
    #[filter(permission = "user.contact")]
    email: String,
}

fn main() {}
