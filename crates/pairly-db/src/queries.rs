use crate::Database;
use crate::models::{ChatRow, UserRow};
use anyhow::{Result, anyhow};
use pairly_types::models::{Candidate, Decision, MutualMatch, OnboardingState};
use rusqlite::Connection;

impl Database {
    // -- Users --

    /// Create the user if needed and (re)arm onboarding at the name step.
    pub fn start_onboarding(&self, telegram_id: i64) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO users (telegram_id, onboarding_state) VALUES (?1, ?2)
                 ON CONFLICT (telegram_id) DO UPDATE SET onboarding_state = excluded.onboarding_state",
                rusqlite::params![telegram_id, OnboardingState::AwaitingName.as_str()],
            )?;
            Ok(())
        })
    }

    pub fn get_user(&self, telegram_id: i64) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user(conn, telegram_id))
    }

    pub fn user_exists(&self, telegram_id: i64) -> Result<bool> {
        self.with_conn(|conn| {
            let found: Option<i64> = conn
                .query_row(
                    "SELECT 1 FROM users WHERE telegram_id = ?1",
                    [telegram_id],
                    |row| row.get(0),
                )
                .optional()?;
            Ok(found.is_some())
        })
    }

    /// Store `value` for the field `step` collects and advance to the next
    /// state, but only if the user is still in `step`. Returns false when
    /// the guard did not match and nothing was written.
    pub fn complete_step(&self, telegram_id: i64, step: OnboardingState, value: &str) -> Result<bool> {
        let (column, next) = match step {
            OnboardingState::AwaitingName => ("name", OnboardingState::AwaitingPhoto),
            OnboardingState::AwaitingPhoto => ("photo_id", OnboardingState::AwaitingBio),
            OnboardingState::AwaitingBio => ("bio", OnboardingState::Onboarded),
            OnboardingState::Onboarded => {
                return Err(anyhow!("User {} has no pending onboarding step", telegram_id));
            }
        };

        self.with_conn(|conn| {
            let sql = format!(
                "UPDATE users SET {column} = ?1, onboarding_state = ?2
                 WHERE telegram_id = ?3 AND onboarding_state = ?4"
            );
            let changed = conn.execute(
                &sql,
                rusqlite::params![value, next.as_str(), telegram_id, step.as_str()],
            )?;
            Ok(changed == 1)
        })
    }

    // -- Matching --

    /// Onboarded users with a photo that `requester` has not decided on yet.
    pub fn eligible_candidates(&self, requester: i64) -> Result<Vec<i64>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT telegram_id FROM users
                 WHERE telegram_id != ?1
                   AND onboarding_state = 'onboarded'
                   AND photo_id IS NOT NULL
                   AND telegram_id NOT IN (SELECT to_user FROM decisions WHERE from_user = ?1)
                 ORDER BY telegram_id",
            )?;

            let ids = stmt
                .query_map([requester], |row| row.get(0))?
                .collect::<std::result::Result<Vec<i64>, _>>()?;

            Ok(ids)
        })
    }

    pub fn get_candidate(&self, telegram_id: i64) -> Result<Option<Candidate>> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT telegram_id, COALESCE(name, ''), photo_id, COALESCE(bio, '')
                 FROM users
                 WHERE telegram_id = ?1 AND onboarding_state = 'onboarded' AND photo_id IS NOT NULL",
                [telegram_id],
                |row| {
                    Ok(Candidate {
                        user_id: row.get(0)?,
                        name: row.get(1)?,
                        photo_id: row.get(2)?,
                        bio: row.get(3)?,
                    })
                },
            )
            .optional()
        })
    }

    // -- Decisions --

    /// Upsert the decision for the ordered pair. Returns the row id when a
    /// row was inserted or its status changed, `None` when the pair already
    /// had this status. An unchanged repeat leaves `updated_at` alone.
    pub fn record_decision(
        &self,
        from_user: i64,
        to_user: i64,
        decision: Decision,
    ) -> Result<Option<i64>> {
        self.with_conn(|conn| {
            conn.query_row(
                "INSERT INTO decisions (from_user, to_user, status) VALUES (?1, ?2, ?3)
                 ON CONFLICT (from_user, to_user) DO UPDATE SET
                     status = excluded.status,
                     updated_at = strftime('%Y-%m-%d %H:%M:%f', 'now')
                 WHERE decisions.status != excluded.status
                 RETURNING id",
                rusqlite::params![from_user, to_user, decision.as_str()],
                |row| row.get(0),
            )
            .optional()
        })
    }

    /// Current status for the ordered pair. Read-only; the bot itself only
    /// needs `check_mutual`.
    pub fn get_decision(&self, from_user: i64, to_user: i64) -> Result<Option<Decision>> {
        self.with_conn(|conn| {
            let status: Option<String> = conn
                .query_row(
                    "SELECT status FROM decisions WHERE from_user = ?1 AND to_user = ?2",
                    [from_user, to_user],
                    |row| row.get(0),
                )
                .optional()?;

            status
                .map(|s| Decision::parse(&s).ok_or_else(|| anyhow!("Corrupt decision status '{}'", s)))
                .transpose()
        })
    }

    /// True iff `to_user` has liked `from_user`.
    pub fn check_mutual(&self, from_user: i64, to_user: i64) -> Result<bool> {
        self.with_conn(|conn| {
            let found: Option<i64> = conn
                .query_row(
                    "SELECT id FROM decisions WHERE from_user = ?1 AND to_user = ?2 AND status = 'liked'",
                    [to_user, from_user],
                    |row| row.get(0),
                )
                .optional()?;
            Ok(found.is_some())
        })
    }

    /// The most recently formed mutual match of `telegram_id`, if any.
    pub fn active_match(&self, telegram_id: i64) -> Result<Option<MutualMatch>> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT MIN(mine.id, theirs.id), theirs.from_user
                 FROM decisions mine
                 JOIN decisions theirs
                   ON theirs.from_user = mine.to_user AND theirs.to_user = mine.from_user
                 WHERE mine.from_user = ?1
                   AND mine.status = 'liked'
                   AND theirs.status = 'liked'
                 ORDER BY MAX(mine.updated_at, theirs.updated_at) DESC, MAX(mine.id, theirs.id) DESC
                 LIMIT 1",
                [telegram_id],
                |row| {
                    Ok(MutualMatch {
                        id: row.get(0)?,
                        user_id: telegram_id,
                        partner_id: row.get(1)?,
                    })
                },
            )
            .optional()
        })
    }

    // -- Chats --

    pub fn insert_chat_message(&self, match_id: i64, sender_id: i64, message: &str) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO chats (match_id, sender_id, message) VALUES (?1, ?2, ?3)",
                rusqlite::params![match_id, sender_id, message],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    /// Conversation log for one match, oldest first. Nothing in the bot reads
    /// the log back; this is for inspecting what was relayed.
    pub fn get_chat_messages(&self, match_id: i64, limit: u32) -> Result<Vec<ChatRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, match_id, sender_id, message, created_at
                 FROM chats
                 WHERE match_id = ?1
                 ORDER BY id ASC
                 LIMIT ?2",
            )?;

            let rows = stmt
                .query_map(rusqlite::params![match_id, limit], |row| {
                    Ok(ChatRow {
                        id: row.get(0)?,
                        match_id: row.get(1)?,
                        sender_id: row.get(2)?,
                        message: row.get(3)?,
                        created_at: row.get(4)?,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            Ok(rows)
        })
    }
}

fn query_user(conn: &Connection, telegram_id: i64) -> Result<Option<UserRow>> {
    let mut stmt = conn.prepare(
        "SELECT telegram_id, name, photo_id, bio, onboarding_state, created_at
         FROM users WHERE telegram_id = ?1",
    )?;

    let row = stmt
        .query_row([telegram_id], |row| {
            Ok(UserRow {
                telegram_id: row.get(0)?,
                name: row.get(1)?,
                photo_id: row.get(2)?,
                bio: row.get(3)?,
                onboarding_state: row.get(4)?,
                created_at: row.get(5)?,
            })
        })
        .optional()?;

    Ok(row)
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
