//! Queries behind the health tracking commands.

use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::db::models::*;
use crate::error::{BotError, Result};
use crate::schema::{
    body_tracking, diet_entries, exercise_entries, health_profiles, journal_entries,
    sleep_entries, todo_entries,
};

impl HealthProfile {

    /// Creates or overwrites the visibility of `user_id`'s profile.
    pub fn set_visibility(conn: &mut SqliteConnection, user_id: u64, public: bool) -> Result<usize> {
        let profile = HealthProfile { user_id: user_id as i64, is_public: public };

        diesel::insert_into(health_profiles::table)
            .values(&profile)
            .on_conflict(health_profiles::user_id)
            .do_update()
            .set(health_profiles::is_public.eq(public))
            .execute(conn)
            .map_err(BotError::from)
    }

    /// Whether other users may look at `user_id`'s profile.
    /// Users without a profile are private.
    pub fn is_public(conn: &mut SqliteConnection, user_id: u64) -> Result<bool> {
        health_profiles::table
            .find(user_id as i64)
            .select(health_profiles::is_public)
            .first(conn)
            .optional()
            .map(|p| p.unwrap_or(false))
            .map_err(BotError::from)
    }
}

impl SleepEntry {
    pub fn insert(conn: &mut SqliteConnection, entry: &NewSleepEntry) -> Result<usize> {
        diesel::insert_into(sleep_entries::table)
            .values(entry)
            .execute(conn)
            .map_err(BotError::from)
    }

    pub fn latest(conn: &mut SqliteConnection, user_id: u64) -> Result<Option<Self>> {
        sleep_entries::table
            .filter(sleep_entries::user_id.eq(user_id as i64))
            .order_by((sleep_entries::date.desc(), sleep_entries::id.desc()))
            .select(Self::as_select())
            .first(conn)
            .optional()
            .map_err(BotError::from)
    }
}

impl DietEntry {
    pub fn insert(conn: &mut SqliteConnection, entry: &NewDietEntry) -> Result<usize> {
        diesel::insert_into(diet_entries::table)
            .values(entry)
            .execute(conn)
            .map_err(BotError::from)
    }

    pub fn latest(conn: &mut SqliteConnection, user_id: u64) -> Result<Option<Self>> {
        diet_entries::table
            .filter(diet_entries::user_id.eq(user_id as i64))
            .order_by((diet_entries::date.desc(), diet_entries::time.desc()))
            .select(Self::as_select())
            .first(conn)
            .optional()
            .map_err(BotError::from)
    }
}

impl ExerciseEntry {
    pub fn insert(conn: &mut SqliteConnection, entry: &NewExerciseEntry) -> Result<usize> {
        diesel::insert_into(exercise_entries::table)
            .values(entry)
            .execute(conn)
            .map_err(BotError::from)
    }

    pub fn latest(conn: &mut SqliteConnection, user_id: u64) -> Result<Option<Self>> {
        exercise_entries::table
            .filter(exercise_entries::user_id.eq(user_id as i64))
            .order_by((exercise_entries::date.desc(), exercise_entries::id.desc()))
            .select(Self::as_select())
            .first(conn)
            .optional()
            .map_err(BotError::from)
    }
}

impl TodoEntry {
    pub fn add(conn: &mut SqliteConnection, entry: &NewTodoEntry) -> Result<usize> {
        diesel::insert_into(todo_entries::table)
            .values(entry)
            .execute(conn)
            .map_err(BotError::from)
    }

    /// `user_id`'s tasks for `day`, in the order they were added.
    pub fn for_day(conn: &mut SqliteConnection, user_id: u64, day: &str) -> Result<Vec<Self>> {
        todo_entries::table
            .filter(todo_entries::user_id.eq(user_id as i64))
            .filter(todo_entries::date.eq(day))
            .order_by(todo_entries::id)
            .select(Self::as_select())
            .load(conn)
            .map_err(BotError::from)
    }

    /// Row id of the `position`-th (1-based) task of the day.
    fn nth_id(conn: &mut SqliteConnection, user_id: u64, day: &str, position: usize) -> Result<Option<i32>> {
        if position == 0 {
            return Ok(None);
        }
        todo_entries::table
            .filter(todo_entries::user_id.eq(user_id as i64))
            .filter(todo_entries::date.eq(day))
            .order_by(todo_entries::id)
            .select(todo_entries::id)
            .offset(position as i64 - 1)
            .first(conn)
            .optional()
            .map_err(BotError::from)
    }

    /// Deletes the `position`-th task of the day.
    /// Returns false if there is no such task.
    pub fn remove_nth(conn: &mut SqliteConnection, user_id: u64, day: &str, position: usize) -> Result<bool> {
        conn.transaction(|conn| {
            let Some(task_id) = Self::nth_id(conn, user_id, day, position)? else {
                return Ok(false);
            };
            diesel::delete(todo_entries::table.find(task_id))
                .execute(conn)?;
            Ok(true)
        })
    }

    /// Replaces the text of the `position`-th task of the day.
    pub fn rename_nth(
        conn: &mut SqliteConnection,
        user_id: u64,
        day: &str,
        position: usize,
        task: &str,
    ) -> Result<bool> {
        conn.transaction(|conn| {
            let Some(task_id) = Self::nth_id(conn, user_id, day, position)? else {
                return Ok(false);
            };
            diesel::update(todo_entries::table.find(task_id))
                .set(todo_entries::task.eq(task))
                .execute(conn)?;
            Ok(true)
        })
    }

    /// Ticks off the `position`-th task of the day.
    pub fn complete_nth(conn: &mut SqliteConnection, user_id: u64, day: &str, position: usize) -> Result<bool> {
        conn.transaction(|conn| {
            let Some(task_id) = Self::nth_id(conn, user_id, day, position)? else {
                return Ok(false);
            };
            diesel::update(todo_entries::table.find(task_id))
                .set(todo_entries::completed.eq(true))
                .execute(conn)?;
            Ok(true)
        })
    }
}

impl JournalEntry {
    pub fn insert(conn: &mut SqliteConnection, entry: &NewJournalEntry) -> Result<usize> {
        diesel::insert_into(journal_entries::table)
            .values(entry)
            .execute(conn)
            .map_err(BotError::from)
    }

    /// Date of `user_id`'s most recent entry.
    pub fn latest_date(conn: &mut SqliteConnection, user_id: u64) -> Result<Option<String>> {
        journal_entries::table
            .filter(journal_entries::user_id.eq(user_id as i64))
            .order_by((journal_entries::date.desc(), journal_entries::time.desc()))
            .select(journal_entries::date)
            .first(conn)
            .optional()
            .map_err(BotError::from)
    }

    /// The last entry `user_id` wrote on `day`.
    pub fn latest_on(conn: &mut SqliteConnection, user_id: u64, day: &str) -> Result<Option<Self>> {
        journal_entries::table
            .filter(journal_entries::user_id.eq(user_id as i64))
            .filter(journal_entries::date.eq(day))
            .order_by((journal_entries::time.desc(), journal_entries::id.desc()))
            .select(Self::as_select())
            .first(conn)
            .optional()
            .map_err(BotError::from)
    }
}

impl BodyMeasurement {
    pub fn insert(conn: &mut SqliteConnection, entry: &NewBodyMeasurement) -> Result<usize> {
        diesel::insert_into(body_tracking::table)
            .values(entry)
            .execute(conn)
            .map_err(BotError::from)
    }

    pub fn latest(conn: &mut SqliteConnection, user_id: u64) -> Result<Option<Self>> {
        body_tracking::table
            .filter(body_tracking::user_id.eq(user_id as i64))
            .order_by((body_tracking::date.desc(), body_tracking::time.desc()))
            .select(Self::as_select())
            .first(conn)
            .optional()
            .map_err(BotError::from)
    }
}
