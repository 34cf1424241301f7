use permfilter::FilterFields;

#[derive(FilterFields)]
enum Contact {
    Email(String),
    Phone(String),
}

fn main() {}
