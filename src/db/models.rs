use diesel::prelude::*;

use crate::schema::{
    body_tracking, deleted_messages, diet_entries, exercise_entries, health_profiles,
    journal_entries, sleep_entries, todo_entries,
};

#[derive(Queryable, Selectable, Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = health_profiles)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct HealthProfile {
    pub user_id: i64,
    pub is_public: bool,
}

#[derive(Queryable, Selectable, Debug, Clone, PartialEq)]
#[diesel(table_name = sleep_entries)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SleepEntry {
    pub id: i32,
    pub user_id: i64,
    pub hours_slept: f64,
    pub score: i32,
    pub description: Option<String>,
    pub bed_time: String,
    pub wake_time: String,
    pub date: String,
}

#[derive(Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = sleep_entries)]
pub struct NewSleepEntry {
    pub user_id: i64,
    pub hours_slept: f64,
    pub score: i32,
    pub description: Option<String>,
    pub bed_time: String,
    pub wake_time: String,
    pub date: String,
}

#[derive(Queryable, Selectable, Debug, Clone, PartialEq)]
#[diesel(table_name = diet_entries)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DietEntry {
    pub id: i32,
    pub user_id: i64,
    pub food: String,
    pub calories: i32,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
    pub fiber: f64,
    pub date: String,
    pub time: String,
    pub description: Option<String>,
}

#[derive(Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = diet_entries)]
pub struct NewDietEntry {
    pub user_id: i64,
    pub food: String,
    pub calories: i32,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
    pub fiber: f64,
    pub date: String,
    pub time: String,
    pub description: Option<String>,
}

#[derive(Queryable, Selectable, Debug, Clone, PartialEq)]
#[diesel(table_name = exercise_entries)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ExerciseEntry {
    pub id: i32,
    pub user_id: i64,
    pub name: String,
    pub reps: i32,
    pub sets: i32,
    pub variation: String,
    pub cool_down: Option<String>,
    pub date: String,
}

#[derive(Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = exercise_entries)]
pub struct NewExerciseEntry {
    pub user_id: i64,
    pub name: String,
    pub reps: i32,
    pub sets: i32,
    pub variation: String,
    pub cool_down: Option<String>,
    pub date: String,
}

#[derive(Queryable, Selectable, Debug, Clone, PartialEq)]
#[diesel(table_name = todo_entries)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TodoEntry {
    pub id: i32,
    pub user_id: i64,
    pub task: String,
    pub date: String,
    pub completed: bool,
}

#[derive(Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = todo_entries)]
pub struct NewTodoEntry {
    pub user_id: i64,
    pub task: String,
    pub date: String,
    pub completed: bool,
}

#[derive(Queryable, Selectable, Debug, Clone, PartialEq)]
#[diesel(table_name = journal_entries)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct JournalEntry {
    pub id: i32,
    pub user_id: i64,
    pub entry: String,
    pub date: String,
    pub time: String,
    pub mood: i32,
}

#[derive(Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = journal_entries)]
pub struct NewJournalEntry {
    pub user_id: i64,
    pub entry: String,
    pub date: String,
    pub time: String,
    pub mood: i32,
}

#[derive(Queryable, Selectable, Debug, Clone, PartialEq)]
#[diesel(table_name = body_tracking)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BodyMeasurement {
    pub id: i32,
    pub user_id: i64,
    pub mass_in_kg: f64,
    pub height: f64,
    pub age: i32,
    pub activity_level: i32,
    pub body_fat_percentage: f64,
    pub time: String,
    pub date: String,
}

#[derive(Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = body_tracking)]
pub struct NewBodyMeasurement {
    pub user_id: i64,
    pub mass_in_kg: f64,
    pub height: f64,
    pub age: i32,
    pub activity_level: i32,
    pub body_fat_percentage: f64,
    pub time: String,
    pub date: String,
}

#[derive(Queryable, Selectable, Debug, Clone, PartialEq)]
#[diesel(table_name = deleted_messages)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DeletedMessage {
    pub id: i32,
    pub user_id: i64,
    pub guild_id: i64,
    pub channel_id: i64,
    pub content: String,
    pub deleted_at: String,
}

#[derive(Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = deleted_messages)]
pub struct NewDeletedMessage {
    pub user_id: i64,
    pub guild_id: i64,
    pub channel_id: i64,
    pub content: String,
    pub deleted_at: String,
}
