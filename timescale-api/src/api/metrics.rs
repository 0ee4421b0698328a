use chrono::{DateTime, Utc};
use sqlx::QueryBuilder;
use sqlx::postgres::{PgConnection, Postgres};
use crate::{Client, Error};

const CHUNK: usize = 4_000;

const INSERT: &str = concat!(
    "INSERT INTO ad_metrics (",
    "time, id_ip, n_flows, n_packets, n_bytes, ",
    "n_dest_ip_pri, n_dest_ip_pub, n_dest_asn, n_dest_countries, n_dest_ports, ",
    "tcp_udp_ratio_packets, tcp_udp_ratio_bytes, dir_ratio_packets, dir_ratio_bytes, ",
    "avg_duration, avg_ttl) ",
);

#[derive(Clone, Debug)]
pub struct Point {
    pub time:              DateTime<Utc>,
    pub entity:            i64,
    pub flows:             i64,
    pub packets:           i64,
    pub bytes:             i64,
    pub dest_private:      i64,
    pub dest_public:       i64,
    pub dest_asns:         i64,
    pub dest_countries:    i64,
    pub dest_ports:        i64,
    pub tcp_ratio_packets: f64,
    pub tcp_ratio_bytes:   f64,
    pub dir_ratio_packets: f64,
    pub dir_ratio_bytes:   f64,
    pub avg_duration:      f64,
    pub avg_ttl:           f64,
}

impl Client {
    pub async fn insert_points(&self, conn: &mut PgConnection, points: &[Point]) -> Result<(), Error> {
        if points.is_empty() {
            return Ok(());
        }

        for chunk in points.chunks(CHUNK) {
            let mut query = QueryBuilder::<Postgres>::new(INSERT);
            query.push_values(chunk, |mut row, point| {
                row.push_bind(point.time);
                row.push_bind(point.entity);
                row.push_bind(point.flows);
                row.push_bind(point.packets);
                row.push_bind(point.bytes);
                row.push_bind(point.dest_private);
                row.push_bind(point.dest_public);
                row.push_bind(point.dest_asns);
                row.push_bind(point.dest_countries);
                row.push_bind(point.dest_ports);
                row.push_bind(point.tcp_ratio_packets);
                row.push_bind(point.tcp_ratio_bytes);
                row.push_bind(point.dir_ratio_packets);
                row.push_bind(point.dir_ratio_bytes);
                row.push_bind(point.avg_duration);
                row.push_bind(point.avg_ttl);
            });
            query.build().execute(&mut *conn).await?;
        }

        Ok(())
    }
}
