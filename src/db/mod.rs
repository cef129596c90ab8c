//! Read-only access to the analytics snapshot.
//!
//! The snapshot is a plain SQLite file produced by the collector, with
//! three tables: `management_novels`, `daily_statistics` (per-novel daily
//! cumulative views) and `daily_rankings` (per-platform chart rows).
//! Everything here is parameterized SQL over that fixed schema. Rows with
//! an unparseable date or a missing numeric value are skipped; sparse and
//! noisy collection is normal, a bad row never aborts a report.

use std::error::Error;
use std::path::Path;

use chrono::NaiveDate;
use rusqlite::{Connection, OpenFlags, params};

/// Ranking sections collected by the rookie monitor, in display order.
pub const ROOKIE_RANKING_TYPES: &[&str] = &[
    "rookie",
    "new_novel_today",
    "genre_heroism",
    "genre_fantasy",
    "genre_fusion",
    "genre_game",
    "genre_newfantasy",
    "genre_history",
];

/// `IN (...)` list matching [`ROOKIE_RANKING_TYPES`]; keep both in sync.
const ROOKIE_TYPES_SQL: &str = "('rookie', 'new_novel_today', 'genre_heroism', 'genre_fantasy', \
     'genre_fusion', 'genre_game', 'genre_newfantasy', 'genre_history')";

#[derive(Debug, Clone)]
pub struct Novel {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub platform: Option<String>,
    pub genre: Option<String>,
    pub launch_date: Option<NaiveDate>,
    pub novel_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct DailyStat {
    pub date: NaiveDate,
    pub views: f64,
    pub revenue: Option<f64>,
    pub detail_data: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RankingRow {
    pub platform: String,
    pub ranking_type: String,
    pub rank: i64,
    pub title: String,
    pub author: Option<String>,
    pub genre: Option<String>,
    pub views: Option<f64>,
    pub novel_id: Option<i64>,
    pub novel_url: Option<String>,
}

pub struct NovelDb {
    conn: Connection,
}

/// `YYYY-MM-DD`, tolerating a trailing time component.
fn parse_date(s: &str) -> Option<NaiveDate> {
    let day_part = s.get(..10).unwrap_or(s);
    NaiveDate::parse_from_str(day_part, "%Y-%m-%d").ok()
}

fn date_param(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

impl NovelDb {
    /// Open a snapshot read-only; the viewer never writes.
    pub fn open(path: &Path) -> Result<Self, Box<dyn Error>> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| format!("cannot open database {}: {e}", path.display()))?;
        Ok(Self { conn })
    }

    // ---- novels ----

    pub fn all_novels(&self) -> Result<Vec<Novel>, Box<dyn Error>> {
        self.query_novels(
            "SELECT id, title, author, platform, genre, launch_date, novel_url
             FROM management_novels ORDER BY created_at DESC",
            params![],
        )
    }

    pub fn novels_with_launch_date(&self) -> Result<Vec<Novel>, Box<dyn Error>> {
        self.query_novels(
            "SELECT id, title, author, platform, genre, launch_date, novel_url
             FROM management_novels WHERE launch_date IS NOT NULL",
            params![],
        )
    }

    pub fn novel_by_id(&self, id: i64) -> Result<Option<Novel>, Box<dyn Error>> {
        let novels = self.query_novels(
            "SELECT id, title, author, platform, genre, launch_date, novel_url
             FROM management_novels WHERE id = ?1",
            params![id],
        )?;
        Ok(novels.into_iter().next())
    }

    fn query_novels<P: rusqlite::Params>(
        &self,
        sql: &str,
        params: P,
    ) -> Result<Vec<Novel>, Box<dyn Error>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(params, |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, Option<String>>(2)?,
                row.get::<_, Option<String>>(3)?,
                row.get::<_, Option<String>>(4)?,
                row.get::<_, Option<String>>(5)?,
                row.get::<_, Option<String>>(6)?,
            ))
        })?;

        let mut novels = Vec::new();
        for row in rows {
            let (id, title, author, platform, genre, launch_date, novel_url) = match row {
                Ok(r) => r,
                Err(e) => {
                    eprintln!("warning: skipping novel row: {e}");
                    continue;
                }
            };
            let launch_date = launch_date.as_deref().and_then(|raw| {
                let parsed = parse_date(raw);
                if parsed.is_none() {
                    eprintln!("warning: novel {id}: unparseable launch date {raw:?}");
                }
                parsed
            });
            novels.push(Novel {
                id,
                title,
                author: author.unwrap_or_default(),
                platform,
                genre,
                launch_date,
                novel_url,
            });
        }
        Ok(novels)
    }

    // ---- daily statistics ----

    /// All of one novel's daily rows, oldest first.
    pub fn daily_stats(&self, novel_id: i64) -> Result<Vec<DailyStat>, Box<dyn Error>> {
        let mut stmt = self.conn.prepare(
            "SELECT date, views, revenue, detail_data
             FROM daily_statistics WHERE novel_id = ?1 ORDER BY date ASC",
        )?;
        let rows = stmt.query_map(params![novel_id], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, Option<f64>>(1)?,
                row.get::<_, Option<f64>>(2)?,
                row.get::<_, Option<String>>(3)?,
            ))
        })?;

        let mut stats = Vec::new();
        for row in rows {
            let (date_str, views, revenue, detail_data) = match row {
                Ok(r) => r,
                Err(e) => {
                    eprintln!("warning: skipping stat row: {e}");
                    continue;
                }
            };
            let Some(date) = parse_date(&date_str) else {
                eprintln!("warning: skipping stat with unparseable date {date_str:?}");
                continue;
            };
            let Some(views) = views else {
                continue;
            };
            stats.push(DailyStat {
                date,
                views,
                revenue,
                detail_data,
            });
        }
        Ok(stats)
    }

    /// (date, views) pairs in the shape the series and surge engines take.
    pub fn observations(&self, novel_id: i64) -> Result<Vec<(NaiveDate, f64)>, Box<dyn Error>> {
        Ok(self
            .daily_stats(novel_id)?
            .into_iter()
            .map(|stat| (stat.date, stat.views))
            .collect())
    }

    /// One novel's row on an exact date, if collected that day.
    pub fn stat_on(
        &self,
        novel_id: i64,
        date: NaiveDate,
    ) -> Result<Option<DailyStat>, Box<dyn Error>> {
        let mut stmt = self.conn.prepare(
            "SELECT date, views, revenue, detail_data
             FROM daily_statistics WHERE novel_id = ?1 AND date = ?2",
        )?;
        let mut rows = stmt.query_map(params![novel_id, date_param(date)], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, Option<f64>>(1)?,
                row.get::<_, Option<f64>>(2)?,
                row.get::<_, Option<String>>(3)?,
            ))
        })?;

        match rows.next() {
            Some(Ok((date_str, views, revenue, detail_data))) => {
                let (Some(date), Some(views)) = (parse_date(&date_str), views) else {
                    return Ok(None);
                };
                Ok(Some(DailyStat {
                    date,
                    views,
                    revenue,
                    detail_data,
                }))
            }
            Some(Err(e)) => Err(e.into()),
            None => Ok(None),
        }
    }

    /// Bulk (novel_id, date, views) rows for every novel with a known
    /// launch date; the aggregate view reads the whole population at once.
    pub fn all_stats_for_aggregate(
        &self,
    ) -> Result<Vec<(i64, NaiveDate, f64)>, Box<dyn Error>> {
        let mut stmt = self.conn.prepare(
            "SELECT ds.novel_id, ds.date, ds.views
             FROM daily_statistics ds
             JOIN management_novels mn ON mn.id = ds.novel_id
             WHERE mn.launch_date IS NOT NULL
             ORDER BY ds.novel_id, ds.date",
        )?;
        let rows = stmt.query_map(params![], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, Option<f64>>(2)?,
            ))
        })?;

        let mut stats = Vec::new();
        for row in rows {
            let (novel_id, date_str, views) = match row {
                Ok(r) => r,
                Err(e) => {
                    eprintln!("warning: skipping stat row: {e}");
                    continue;
                }
            };
            let (Some(date), Some(views)) = (parse_date(&date_str), views) else {
                continue;
            };
            stats.push((novel_id, date, views));
        }
        Ok(stats)
    }

    // ---- rankings ----

    /// All ranking rows for one date, grouped by platform then rank.
    pub fn rankings_by_date(&self, date: NaiveDate) -> Result<Vec<RankingRow>, Box<dyn Error>> {
        self.query_rankings(
            "SELECT platform, ranking_type, rank, title, author, genre,
                    views, novel_id, novel_url
             FROM daily_rankings WHERE ranking_date = ?1 ORDER BY platform, rank",
            params![date_param(date)],
        )
    }

    /// Rookie-monitor section rows for one date.
    pub fn rookie_rankings_by_date(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<RankingRow>, Box<dyn Error>> {
        let sql = format!(
            "SELECT platform, ranking_type, rank, title, author, genre,
                    views, novel_id, novel_url
             FROM daily_rankings
             WHERE ranking_date = ?1 AND ranking_type IN {ROOKIE_TYPES_SQL}
             ORDER BY ranking_type, rank"
        );
        self.query_rankings(&sql, params![date_param(date)])
    }

    pub fn latest_ranking_date(&self) -> Result<Option<NaiveDate>, Box<dyn Error>> {
        let raw: Option<String> = self.conn.query_row(
            "SELECT MAX(ranking_date) FROM daily_rankings",
            params![],
            |row| row.get(0),
        )?;
        Ok(raw.as_deref().and_then(parse_date))
    }

    pub fn latest_rookie_date(&self) -> Result<Option<NaiveDate>, Box<dyn Error>> {
        let sql = format!(
            "SELECT MAX(ranking_date) FROM daily_rankings WHERE ranking_type IN {ROOKIE_TYPES_SQL}"
        );
        let raw: Option<String> = self.conn.query_row(&sql, params![], |row| row.get(0))?;
        Ok(raw.as_deref().and_then(parse_date))
    }

    /// Dates with ranking data, newest first.
    pub fn available_ranking_dates(
        &self,
        limit: usize,
    ) -> Result<Vec<NaiveDate>, Box<dyn Error>> {
        let mut stmt = self.conn.prepare(
            "SELECT DISTINCT ranking_date FROM daily_rankings
             ORDER BY ranking_date DESC LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![limit as i64], |row| row.get::<_, String>(0))?;

        let mut dates = Vec::new();
        for row in rows {
            match row {
                Ok(raw) => {
                    if let Some(date) = parse_date(&raw) {
                        dates.push(date);
                    }
                }
                Err(e) => eprintln!("warning: skipping ranking date: {e}"),
            }
        }
        Ok(dates)
    }

    fn query_rankings<P: rusqlite::Params>(
        &self,
        sql: &str,
        params: P,
    ) -> Result<Vec<RankingRow>, Box<dyn Error>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(params, |row| {
            Ok(RankingRow {
                platform: row.get::<_, Option<String>>(0)?.unwrap_or_default(),
                ranking_type: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                rank: row.get(2)?,
                title: row.get(3)?,
                author: row.get(4)?,
                genre: row.get(5)?,
                views: row.get(6)?,
                novel_id: row.get(7)?,
                novel_url: row.get(8)?,
            })
        })?;

        let mut rankings = Vec::new();
        for row in rows {
            match row {
                Ok(ranking) => rankings.push(ranking),
                Err(e) => eprintln!("warning: skipping ranking row: {e}"),
            }
        }
        Ok(rankings)
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
