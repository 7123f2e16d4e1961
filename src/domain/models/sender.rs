#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Sender {
    User,
    Agent,
}
