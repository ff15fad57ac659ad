#[derive(Fail, Debug, PartialEq)]
pub enum ConfigError {
    #[fail(display = "{} is mandatory", key)]
    MissingVariable { key: String },
    #[fail(display = "Invalid value {:?} for {}", value, key)]
    InvalidValue { key: String, value: String },
    #[fail(display = "{} does not contain any entry", key)]
    EmptyList { key: String },
}
