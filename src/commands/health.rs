//! Health tracking: profiles, modal-driven trackers, todos and a journal.

use std::sync::atomic::Ordering;
use std::time::Duration;

use chrono::Local;
use poise::{CreateReply, Modal};
use serenity::all::{
    Colour, CreateEmbed, CreateEmbedFooter, CreateInteractionResponse,
    CreateInteractionResponseMessage, ModalInteraction, ModalInteractionCollector, User,
};

use crate::db::db_conn;
use crate::error::{BotError, Result};
use crate::health::{
    display_date, display_stored, optional_text, parse_date, parse_number, parse_position,
    parse_rating, stored_date, tdee, HealthError, Stamp, Tdee,
};
use crate::models::*;

use super::{failure_text, ApplicationContext, Context};

/// How long a modal stays open before the submission is ignored.
const MODAL_TIMEOUT: Duration = Duration::from_secs(600);

#[derive(Debug, Modal)]
#[name = "Sleep Tracking"]
struct SleepForm {
    #[name = "Hours Slept"]
    #[placeholder = "e.g., 7.5"]
    hours_slept: String,
    #[name = "Sleep Quality Score (1-5)"]
    #[placeholder = "e.g., 4"]
    score: String,
    #[name = "Description"]
    #[paragraph]
    description: Option<String>,
    #[name = "Bed Time"]
    #[placeholder = "e.g., 22:30"]
    bed_time: String,
    #[name = "Wake Time"]
    #[placeholder = "e.g., 06:30"]
    wake_time: String,
}

impl SleepForm {
    fn into_entry(self, user_id: u64, stamp: Stamp) -> core::result::Result<NewSleepEntry, HealthError> {
        Ok(NewSleepEntry {
            user_id: user_id as i64,
            hours_slept: parse_number("Hours Slept", &self.hours_slept)?,
            score: parse_rating("Sleep Quality Score", &self.score)?,
            description: optional_text(self.description),
            bed_time: self.bed_time.trim().to_string(),
            wake_time: self.wake_time.trim().to_string(),
            date: stamp.date,
        })
    }
}

#[derive(Debug, Modal)]
#[name = "Diet Tracking"]
struct DietForm {
    #[name = "Food/Ingredient"]
    food: String,
    #[name = "Calories"]
    calories: String,
    #[name = "Protein (g)"]
    protein: String,
    #[name = "Fat (g)"]
    fat: String,
    #[name = "Carbs (g)"]
    carbs: String,
}

impl DietForm {
    fn into_entry(self, user_id: u64, stamp: Stamp) -> core::result::Result<NewDietEntry, HealthError> {
        Ok(NewDietEntry {
            user_id: user_id as i64,
            food: self.food.trim().to_string(),
            calories: parse_number("Calories", &self.calories)?,
            protein: parse_number("Protein", &self.protein)?,
            fat: parse_number("Fat", &self.fat)?,
            carbs: parse_number("Carbs", &self.carbs)?,
            // Discord caps modals at five inputs; fiber never gets one.
            fiber: 0.0,
            date: stamp.date,
            time: stamp.time,
            description: None,
        })
    }
}

#[derive(Debug, Modal)]
#[name = "Exercise Tracking"]
struct ExerciseForm {
    #[name = "Exercise Name"]
    name: String,
    #[name = "Number of Reps"]
    reps: String,
    #[name = "Number of Sets"]
    sets: String,
    #[name = "Variation/Weights"]
    variation: String,
    #[name = "Cool Down"]
    cool_down: Option<String>,
}

impl ExerciseForm {
    fn into_entry(self, user_id: u64, stamp: Stamp) -> core::result::Result<NewExerciseEntry, HealthError> {
        Ok(NewExerciseEntry {
            user_id: user_id as i64,
            name: self.name.trim().to_string(),
            reps: parse_number("Number of Reps", &self.reps)?,
            sets: parse_number("Number of Sets", &self.sets)?,
            variation: self.variation.trim().to_string(),
            cool_down: optional_text(self.cool_down),
            date: stamp.date,
        })
    }
}

#[derive(Debug, Modal)]
#[name = "Body Tracking"]
struct BodyForm {
    #[name = "Mass (kg)"]
    mass: String,
    #[name = "Height (cm)"]
    height: String,
    #[name = "Age"]
    age: String,
    #[name = "Activity Level (1-5)"]
    activity_level: String,
    #[name = "Body Fat Percentage"]
    body_fat: String,
}

impl BodyForm {
    fn into_entry(self, user_id: u64, stamp: Stamp) -> core::result::Result<NewBodyMeasurement, HealthError> {
        Ok(NewBodyMeasurement {
            user_id: user_id as i64,
            mass_in_kg: parse_number("Mass", &self.mass)?,
            height: parse_number("Height", &self.height)?,
            age: parse_number("Age", &self.age)?,
            activity_level: parse_rating("Activity Level", &self.activity_level)?,
            body_fat_percentage: parse_number("Body Fat Percentage", &self.body_fat)?,
            time: stamp.time,
            date: stamp.date,
        })
    }
}

#[derive(Debug, Modal)]
#[name = "Journal Entry"]
struct JournalForm {
    #[name = "Journal Entry"]
    #[paragraph]
    entry: String,
    #[name = "Mood (1-5)"]
    mood: String,
}

impl JournalForm {
    fn into_entry(self, user_id: u64, stamp: Stamp) -> core::result::Result<NewJournalEntry, HealthError> {
        Ok(NewJournalEntry {
            user_id: user_id as i64,
            mood: parse_rating("Mood", &self.mood)?,
            entry: self.entry,
            date: stamp.date,
            time: stamp.time,
        })
    }
}

#[derive(Debug, Modal)]
#[name = "Add Todo"]
struct TodoAddForm {
    #[name = "Task"]
    task: String,
}

#[derive(Debug, Modal)]
#[name = "Choose Todo"]
struct TodoPickForm {
    #[name = "Task Number"]
    task_number: String,
}

#[derive(Debug, Modal)]
#[name = "Edit Todo"]
struct TodoEditForm {
    #[name = "Task Number to Edit"]
    task_number: String,
    #[name = "New Task Description"]
    new_task: String,
}

/// Shows modal `M` and waits for it to be submitted.
///
/// The submission is a separate interaction; it is handed back so that
/// the reply goes to the user who filled in the form.
/// `poise::execute_modal` acknowledges and drops that interaction itself.
async fn ask<M: Modal>(ctx: ApplicationContext<'_>) -> Result<Option<(M, ModalInteraction)>> {
    let custom_id = ctx.interaction.id.to_string();
    let http = &ctx.serenity_context.http;

    ctx.interaction
        .create_response(http, M::create(None, custom_id.clone()))
        .await?;
    ctx.has_sent_initial_response.store(true, Ordering::SeqCst);

    let submit = ModalInteractionCollector::new(&ctx.serenity_context.shard)
        .filter(move |m| m.data.custom_id == custom_id)
        .timeout(MODAL_TIMEOUT)
        .await;

    let Some(submit) = submit else {
        return Ok(None);
    };
    let form = M::parse(submit.data.clone())
        .map_err(|e| BotError::Other(e.to_string()))?;
    Ok(Some((form, submit)))
}

/// Answers a modal submission privately with `outcome`.
async fn answer(ctx: ApplicationContext<'_>, submit: &ModalInteraction, outcome: Result<String>) -> Result<()> {
    let text = match outcome {
        Ok(text) => text,
        Err(e) => failure_text(&e),
    };
    let msg = CreateInteractionResponseMessage::new()
        .content(text)
        .ephemeral(true);
    submit.create_response(&ctx.serenity_context.http, CreateInteractionResponse::Message(msg)).await?;
    Ok(())
}

fn today() -> chrono::NaiveDate {
    Local::now().date_naive()
}

#[poise::command(
    slash_command,
    rename = "health-profile",
    subcommands("profile_set", "profile_view")
)]
pub async fn health_profile(_: Context<'_>) -> Result<()> { Ok(()) }

/// Makes your health profile public or private
#[poise::command(slash_command, rename = "set")]
async fn profile_set(
    ctx: Context<'_>,
    #[description = "Set your profile to public or private"] is_public: bool,
) -> Result<()> {
    {
        let conn = &mut db_conn()?;
        HealthProfile::set_visibility(conn, ctx.author().id.get(), is_public)?;
    }

    let visibility = if is_public { "public" } else { "private" };
    ctx.say(format!("Your health profile has been set to {}.", visibility)).await?;
    Ok(())
}

/// Shows your latest health entries, or those of a public profile
#[poise::command(slash_command, rename = "view")]
async fn profile_view(
    ctx: Context<'_>,
    #[description = "The user whose profile to view (if public)"] user: Option<User>,
) -> Result<()> {
    let target = user.as_ref().unwrap_or_else(|| ctx.author());

    let (sleep, diet, exercise) = {
        let conn = &mut db_conn()?;
        if target.id != ctx.author().id && !HealthProfile::is_public(conn, target.id.get())? {
            return Err(HealthError::PrivateProfile.into());
        }
        (
            SleepEntry::latest(conn, target.id.get())?,
            DietEntry::latest(conn, target.id.get())?,
            ExerciseEntry::latest(conn, target.id.get())?,
        )
    };

    let mut embed = CreateEmbed::new()
        .title(format!("Health Profile for {}", target.display_name()))
        .colour(Colour::DARK_GREEN);

    if let Some(s) = sleep {
        embed = embed.field(
            "Latest Sleep Entry",
            format!("Date: {}\nHours: {}\nScore: {}/5", display_stored(&s.date), s.hours_slept, s.score),
            false,
        );
    }
    if let Some(d) = diet {
        embed = embed.field(
            "Latest Diet Entry",
            format!("Date: {}\nFood: {}\nCalories: {}", display_stored(&d.date), d.food, d.calories),
            false,
        );
    }
    if let Some(e) = exercise {
        embed = embed.field(
            "Latest Exercise Entry",
            format!("Date: {}\nExercise: {}\nSets: {}, Reps: {}", display_stored(&e.date), e.name, e.sets, e.reps),
            false,
        );
    }

    ctx.send(CreateReply::default().embed(embed)).await?;
    Ok(())
}

/// Track your sleep
#[poise::command(slash_command, rename = "sleep-track")]
pub async fn sleep_track(ctx: ApplicationContext<'_>) -> Result<()> {
    let Some((form, submit)) = ask::<SleepForm>(ctx).await? else { return Ok(()) };

    let outcome = form.into_entry(ctx.interaction.user.id.get(), Stamp::now())
        .map_err(BotError::from)
        .and_then(|entry| SleepEntry::insert(&mut db_conn()?, &entry))
        .map(|_| "Sleep data recorded successfully!".to_string());
    answer(ctx, &submit, outcome).await
}

/// Track your diet
#[poise::command(slash_command, rename = "diet-track")]
pub async fn diet_track(ctx: ApplicationContext<'_>) -> Result<()> {
    let Some((form, submit)) = ask::<DietForm>(ctx).await? else { return Ok(()) };

    let outcome = form.into_entry(ctx.interaction.user.id.get(), Stamp::now())
        .map_err(BotError::from)
        .and_then(|entry| DietEntry::insert(&mut db_conn()?, &entry))
        .map(|_| "Diet data recorded successfully!".to_string());
    answer(ctx, &submit, outcome).await
}

/// Track your exercise
#[poise::command(slash_command, rename = "exercise-track")]
pub async fn exercise_track(ctx: ApplicationContext<'_>) -> Result<()> {
    let Some((form, submit)) = ask::<ExerciseForm>(ctx).await? else { return Ok(()) };

    let outcome = form.into_entry(ctx.interaction.user.id.get(), Stamp::now())
        .map_err(BotError::from)
        .and_then(|entry| ExerciseEntry::insert(&mut db_conn()?, &entry))
        .map(|_| "Exercise data recorded successfully!".to_string());
    answer(ctx, &submit, outcome).await
}

/// Track your body measurements
#[poise::command(slash_command, rename = "body-track")]
pub async fn body_track(ctx: ApplicationContext<'_>) -> Result<()> {
    let Some((form, submit)) = ask::<BodyForm>(ctx).await? else { return Ok(()) };

    let outcome = form.into_entry(ctx.interaction.user.id.get(), Stamp::now())
        .map_err(BotError::from)
        .and_then(|entry| BodyMeasurement::insert(&mut db_conn()?, &entry))
        .map(|_| "Body tracking data recorded successfully!".to_string());
    answer(ctx, &submit, outcome).await
}

#[poise::command(
    slash_command,
    subcommands("todo_view", "todo_add", "todo_remove", "todo_edit", "todo_done")
)]
pub async fn todo(_: Context<'_>) -> Result<()> { Ok(()) }

/// Lists the todos of a day
#[poise::command(slash_command, rename = "view")]
async fn todo_view(
    ctx: Context<'_>,
    #[description = "dd/mm/yyyy, or 'today', 'tomorrow', 'yesterday'"] date: Option<String>,
) -> Result<()> {
    let day = parse_date(date.as_deref().unwrap_or("today"), today())?;
    let todos = {
        let conn = &mut db_conn()?;
        TodoEntry::for_day(conn, ctx.author().id.get(), &stored_date(day))?
    };

    if todos.is_empty() {
        ctx.say(format!("No todos found for {}.", display_date(day))).await?;
        return Ok(());
    }

    let fields = todos.iter()
        .enumerate()
        .map(|(i, t)| {
            let status = if t.completed { "✅" } else { "❌" };
            (format!("Task {}", i + 1), format!("{} {}", status, t.task), false)
        });
    let embed = CreateEmbed::new()
        .title(format!("Todo List for {}", display_date(day)))
        .colour(Colour::BLUE)
        .fields(fields);

    ctx.send(CreateReply::default().embed(embed)).await?;
    Ok(())
}

/// Adds a todo
#[poise::command(slash_command, rename = "add")]
async fn todo_add(
    ctx: ApplicationContext<'_>,
    #[description = "dd/mm/yyyy, or 'today', 'tomorrow', 'yesterday'"] date: Option<String>,
) -> Result<()> {
    let day = parse_date(date.as_deref().unwrap_or("today"), today())?;
    let Some((form, submit)) = ask::<TodoAddForm>(ctx).await? else { return Ok(()) };

    let entry = NewTodoEntry {
        user_id: ctx.interaction.user.id.get() as i64,
        task: form.task.trim().to_string(),
        date: stored_date(day),
        completed: false,
    };
    let outcome = db_conn()
        .and_then(|mut conn| TodoEntry::add(&mut conn, &entry))
        .map(|_| format!("Todo added for {}!", display_date(day)));
    answer(ctx, &submit, outcome).await
}

/// Removes a todo
#[poise::command(slash_command, rename = "remove")]
async fn todo_remove(
    ctx: ApplicationContext<'_>,
    #[description = "dd/mm/yyyy, or 'today', 'tomorrow', 'yesterday'"] date: Option<String>,
) -> Result<()> {
    let day = parse_date(date.as_deref().unwrap_or("today"), today())?;
    let Some((form, submit)) = ask::<TodoPickForm>(ctx).await? else { return Ok(()) };

    let user_id = ctx.interaction.user.id.get();
    let outcome = parse_position(&form.task_number)
        .map_err(BotError::from)
        .and_then(|n| {
            let conn = &mut db_conn()?;
            if TodoEntry::remove_nth(conn, user_id, &stored_date(day), n)? {
                Ok(format!("Todo removed for {}!", display_date(day)))
            } else {
                Err(HealthError::NoSuchTask(n).into())
            }
        });
    answer(ctx, &submit, outcome).await
}

/// Rewrites a todo
#[poise::command(slash_command, rename = "edit")]
async fn todo_edit(
    ctx: ApplicationContext<'_>,
    #[description = "dd/mm/yyyy, or 'today', 'tomorrow', 'yesterday'"] date: Option<String>,
) -> Result<()> {
    let day = parse_date(date.as_deref().unwrap_or("today"), today())?;
    let Some((form, submit)) = ask::<TodoEditForm>(ctx).await? else { return Ok(()) };

    let user_id = ctx.interaction.user.id.get();
    let task = form.new_task.trim().to_string();
    let outcome = parse_position(&form.task_number)
        .map_err(BotError::from)
        .and_then(|n| {
            let conn = &mut db_conn()?;
            if TodoEntry::rename_nth(conn, user_id, &stored_date(day), n, &task)? {
                Ok(format!("Todo updated for {}!", display_date(day)))
            } else {
                Err(HealthError::NoSuchTask(n).into())
            }
        });
    answer(ctx, &submit, outcome).await
}

/// Ticks off a todo
#[poise::command(slash_command, rename = "done")]
async fn todo_done(
    ctx: ApplicationContext<'_>,
    #[description = "dd/mm/yyyy, or 'today', 'tomorrow', 'yesterday'"] date: Option<String>,
) -> Result<()> {
    let day = parse_date(date.as_deref().unwrap_or("today"), today())?;
    let Some((form, submit)) = ask::<TodoPickForm>(ctx).await? else { return Ok(()) };

    let user_id = ctx.interaction.user.id.get();
    let outcome = parse_position(&form.task_number)
        .map_err(BotError::from)
        .and_then(|n| {
            let conn = &mut db_conn()?;
            if TodoEntry::complete_nth(conn, user_id, &stored_date(day), n)? {
                Ok(format!("Todo {} done for {}!", n, display_date(day)))
            } else {
                Err(HealthError::NoSuchTask(n).into())
            }
        });
    answer(ctx, &submit, outcome).await
}

#[poise::command(slash_command, subcommands("journal_entry", "journal_view"))]
pub async fn journal(_: Context<'_>) -> Result<()> { Ok(()) }

/// Writes a journal entry
#[poise::command(slash_command, rename = "entry")]
async fn journal_entry(ctx: ApplicationContext<'_>) -> Result<()> {
    let Some((form, submit)) = ask::<JournalForm>(ctx).await? else { return Ok(()) };

    let outcome = form.into_entry(ctx.interaction.user.id.get(), Stamp::now())
        .map_err(BotError::from)
        .and_then(|entry| JournalEntry::insert(&mut db_conn()?, &entry))
        .map(|_| "Journal entry recorded successfully!".to_string());
    answer(ctx, &submit, outcome).await
}

/// Shows the last journal entry of a day
#[poise::command(slash_command, rename = "view")]
async fn journal_view(
    ctx: Context<'_>,
    #[description = "Date of the entry (dd/mm/yyyy), latest entry if omitted"] date: Option<String>,
) -> Result<()> {
    let user_id = ctx.author().id.get();

    let (day, entry) = {
        let conn = &mut db_conn()?;
        let day = match date {
            Some(date) => stored_date(parse_date(&date, today())?),
            None => JournalEntry::latest_date(conn, user_id)?
                .ok_or(HealthError::NoJournalEntries)?,
        };
        let entry = JournalEntry::latest_on(conn, user_id, &day)?;
        (day, entry)
    };

    let Some(entry) = entry else {
        ctx.say(format!("No journal entry found for {}.", display_stored(&day))).await?;
        return Ok(());
    };

    let embed = CreateEmbed::new()
        .title(format!("Journal Entry for {}", display_stored(&day)))
        .colour(Colour::PURPLE)
        .field("Time", entry.time, false)
        .field("Mood", format!("{}/5", entry.mood), false)
        .field("Entry", entry.entry, false);

    ctx.send(CreateReply::default().embed(embed)).await?;
    Ok(())
}

/// Calculate your Total Daily Energy Expenditure
#[poise::command(slash_command, rename = "calculate-tdee")]
pub async fn calculate_tdee(ctx: Context<'_>) -> Result<()> {
    let body = {
        let conn = &mut db_conn()?;
        BodyMeasurement::latest(conn, ctx.author().id.get())?
            .ok_or(HealthError::NoBodyMeasurements)?
    };

    let Tdee { bmr, tdee } = tdee(body.mass_in_kg, body.body_fat_percentage, body.activity_level)?;

    let embed = CreateEmbed::new()
        .title("TDEE Calculation Results")
        .colour(Colour::DARK_GREEN)
        .field("Basal Metabolic Rate (BMR)", format!("{:.2} calories", bmr), false)
        .field("Total Daily Energy Expenditure (TDEE)", format!("{:.2} calories", tdee), false)
        .footer(CreateEmbedFooter::new("TDEE is an estimate and may vary based on individual factors."));

    ctx.send(CreateReply::default().embed(embed)).await?;
    Ok(())
}

const HELP: [(&str, &str); 8] = [
    ("/health-profile", "Set or view health profiles. Use 'set' to update your profile visibility, or 'view' to see profiles."),
    ("/sleep-track", "Track your sleep. Input hours slept, score, description, bed time, and wake-up time."),
    ("/diet-track", "Track your diet. Input food, calories, protein, fat and carbs."),
    ("/exercise-track", "Track your exercises. Input name, reps, sets, variation/weights and cool-down."),
    ("/body-track", "Track your body. Input mass, height, age, activity level and body fat percentage."),
    ("/todo", "Manage your todo list. Use 'view', 'add', 'remove', 'edit' or 'done'. Specify dates as needed."),
    ("/journal", "Manage your journal. Use 'entry' to add a new entry or 'view' to see entries. Specify dates for viewing."),
    ("/calculate-tdee", "Estimate your daily energy expenditure from your latest body measurements."),
];

/// Display help for health tracking commands
#[poise::command(slash_command, rename = "health-help")]
pub async fn health_help(ctx: Context<'_>) -> Result<()> {
    let embed = CreateEmbed::new()
        .title("Health Tracking Commands")
        .colour(Colour::BLUE)
        .fields(HELP.iter().map(|(name, value)| (*name, *value, false)));

    ctx.send(CreateReply::default().embed(embed)).await?;
    Ok(())
}
