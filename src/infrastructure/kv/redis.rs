//! Redis-backed `KvStore`, using the `redis` crate's async connection
//! manager — the ecosystem-standard async client for this (see
//! DESIGN.md).

use super::{KvError, KvStore, PipelineWrite};
use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use std::time::Duration;

pub struct RedisKvStore {
    conn: ConnectionManager,
}

impl RedisKvStore {
    pub async fn connect(url: &str) -> anyhow::Result<Self> {
        let client = redis::Client::open(url)?;
        let conn = client.get_connection_manager().await?;
        Ok(Self { conn })
    }
}

fn transport(err: impl Into<anyhow::Error>) -> KvError {
    KvError::Transport(err.into())
}

#[async_trait]
impl KvStore for RedisKvStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KvError> {
        let mut conn = self.conn.clone();
        conn.get(key).await.map_err(transport)
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Option<Duration>) -> Result<(), KvError> {
        let mut conn = self.conn.clone();
        match ttl {
            Some(ttl) => conn
                .set_ex::<_, _, ()>(key, value, ttl.as_secs().max(1))
                .await
                .map_err(transport),
            None => conn.set::<_, _, ()>(key, value).await.map_err(transport),
        }
    }

    async fn set_if_absent(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<bool, KvError> {
        let mut conn = self.conn.clone();
        let result: Option<String> = redis::cmd("SET")
            .arg(key)
            .arg(value)
            .arg("NX")
            .arg("EX")
            .arg(ttl.as_secs().max(1))
            .query_async(&mut conn)
            .await
            .map_err(transport)?;
        Ok(result.is_some())
    }

    async fn delete(&self, keys: &[String]) -> Result<(), KvError> {
        if keys.is_empty() {
            return Ok(());
        }
        let mut conn = self.conn.clone();
        conn.del::<_, ()>(keys).await.map_err(transport)
    }

    async fn scan(&self, pattern: &str, batch: usize) -> Result<Vec<String>, KvError> {
        let mut conn = self.conn.clone();
        let mut iter = redis::cmd("SCAN")
            .cursor_arg(0)
            .arg("MATCH")
            .arg(pattern)
            .arg("COUNT")
            .arg(batch)
            .iter_async(&mut conn)
            .await
            .map_err(transport)?;
        let mut keys = Vec::new();
        while let Some(key) = futures_util::StreamExt::next(&mut iter).await {
            keys.push(key);
        }
        Ok(keys)
    }

    async fn execute_pipeline(&self, writes: Vec<PipelineWrite>) -> Result<(), KvError> {
        if writes.is_empty() {
            return Ok(());
        }
        let mut pipe = redis::pipe();
        pipe.atomic();
        for write in writes {
            match write {
                PipelineWrite::Set { key, value, ttl } => match ttl {
                    Some(ttl) => {
                        pipe.set_ex(key, value, ttl.as_secs().max(1));
                    }
                    None => {
                        pipe.set(key, value);
                    }
                },
                PipelineWrite::Delete { keys } => {
                    if !keys.is_empty() {
                        pipe.del(keys);
                    }
                }
            }
        }
        let mut conn = self.conn.clone();
        pipe.query_async::<()>(&mut conn).await.map_err(transport)
    }
}
