use std::str::FromStr;
use sqlx::ConnectOptions;
use sqlx::postgres::{PgConnectOptions, PgConnection};
use crate::Error;

pub struct Client {
    pub(crate) options: PgConnectOptions,
}

impl Client {
    pub fn new(url: &str) -> Result<Self, Error> {
        Ok(Self {
            options: PgConnectOptions::from_str(url)?.application_name("sigma"),
        })
    }

    pub async fn connect(&self) -> Result<PgConnection, Error> {
        Ok(self.options.connect().await?)
    }
}
