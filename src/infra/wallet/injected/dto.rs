use {crate::domain::tron, serde::Deserialize};

#[derive(Debug, Deserialize)]
pub struct Account {
    pub address: tron::Address,
}
