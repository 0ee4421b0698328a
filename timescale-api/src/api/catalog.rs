use std::collections::HashMap;
use log::debug;
use sqlx::{QueryBuilder, Row};
use sqlx::postgres::{PgConnection, Postgres};
use crate::{Client, Error};

const CHUNK: usize = 4_000;

pub struct Catalog {
    ids:  HashMap<String, i64>,
    next: i64,
}

#[derive(Clone, Debug)]
pub struct Entity {
    pub id:   i64,
    pub addr: String,
}

impl Catalog {
    pub fn new(ids: HashMap<String, i64>) -> Self {
        let next = ids.values().max().copied().unwrap_or(0) + 1;
        Self {
            ids:  ids,
            next: next,
        }
    }

    pub fn get(&self, addr: &str) -> Option<i64> {
        self.ids.get(addr).copied()
    }

    pub fn assign(&mut self, addr: &str) -> i64 {
        let id = self.next;
        self.ids.insert(addr.to_owned(), id);
        self.next += 1;
        id
    }
}

impl Client {
    pub async fn catalog(&self, conn: &mut PgConnection) -> Result<Catalog, Error> {
        let rows = sqlx::query("SELECT id_ip, ip_address FROM ip_address")
            .fetch_all(&mut *conn).await?;

        let ids = rows.iter().map(|row| {
            (row.get("ip_address"), row.get("id_ip"))
        }).collect::<HashMap<String, i64>>();

        debug!("catalog holds {} addresses", ids.len());

        Ok(Catalog::new(ids))
    }

    pub async fn insert_entities(&self, conn: &mut PgConnection, entities: &[Entity]) -> Result<(), Error> {
        if entities.is_empty() {
            return Ok(());
        }

        for chunk in entities.chunks(CHUNK) {
            let mut query = QueryBuilder::<Postgres>::new("INSERT INTO ip_address (id_ip, ip_address, note) ");
            query.push_values(chunk, |mut row, entity| {
                row.push_bind(entity.id);
                row.push_bind(entity.addr.as_str());
                row.push_bind("");
            });
            // concurrent windows may race to insert the same address
            query.push(" ON CONFLICT (ip_address) DO NOTHING");
            query.build().execute(&mut *conn).await?;
        }

        Ok(())
    }
}
