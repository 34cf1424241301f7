use permfilter::FilterFields;

#[derive(FilterFields)]
struct Email(#[filter(permission = "user.email")] String);

fn main() {}
