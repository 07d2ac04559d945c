//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use chrono::{NaiveDate, NaiveTime};
use clap::{Args, Parser, Subcommand};

use ossaca_model::format::{parse_date, parse_time};
use ossaca_model::{Gender, Id, LocationType};

#[derive(Parser)]
#[command(name = "ossaca")]
#[command(about = "Manage the animals, cares and boxes of a shelter", long_about = None)]
pub(crate) struct Cli {
    /// Shelter database file (defaults to the settings file, then ./ossaca_db.sqlite)
    #[arg(short, long, global = true)]
    pub database: Option<PathBuf>,

    /// Directory receiving uploaded pictures (defaults to the settings file, then ./uploads)
    #[arg(long, global = true)]
    pub uploads: Option<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable debug logging, including every SQL statement
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Manage dogs
    Dogs {
        #[command(subcommand)]
        action: AnimalAction,
    },

    /// Manage cats
    Cats {
        #[command(subcommand)]
        action: AnimalAction,
    },

    /// Manage the catalogue of cares
    Cares {
        #[command(subcommand)]
        action: CareAction,
    },

    /// Manage shelter states (adopted, available, ...)
    States {
        #[command(subcommand)]
        action: LabelAction,
    },

    /// Manage kinds of food
    Foods {
        #[command(subcommand)]
        action: LabelAction,
    },

    /// Manage bowls
    Bowls {
        #[command(subcommand)]
        action: LabelAction,
    },

    /// Manage boxes
    Boxes {
        #[command(subcommand)]
        action: BoxAction,
    },

    /// Manage locations
    Locations {
        #[command(subcommand)]
        action: LocationAction,
    },

    /// Record and list state or location changes
    Sheets {
        #[command(subcommand)]
        action: SheetAction,
    },

    /// Record and list cares given to animals
    Caresheets {
        #[command(subcommand)]
        action: CareSheetAction,
    },

    /// Inspect plugins
    Plugins {
        #[command(subcommand)]
        action: PluginAction,
    },

    /// Show settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

// ── Value parsers ───────────────────────────────────────────────────────────

fn date_arg(s: &str) -> Result<NaiveDate, String> {
    parse_date(s).map_err(|e| e.to_string())
}

fn time_arg(s: &str) -> Result<NaiveTime, String> {
    parse_time(s).map_err(|e| e.to_string())
}

fn gender_arg(s: &str) -> Result<Gender, String> {
    s.parse()
}

fn location_type_arg(s: &str) -> Result<LocationType, String> {
    s.parse()
}

// ── Animals ─────────────────────────────────────────────────────────────────

#[derive(Subcommand)]
pub(crate) enum AnimalAction {
    /// List animals with their age and latest state
    List,

    /// Show every field of one animal
    Show { id: Id },

    /// Add an animal
    Add {
        /// Name of the animal
        name: String,

        #[command(flatten)]
        fields: AnimalFields,
    },

    /// Change fields of an animal
    Update {
        id: Id,

        /// New name
        #[arg(long)]
        name: Option<String>,

        #[command(flatten)]
        fields: AnimalFields,
    },

    /// Delete an animal
    Delete { id: Id },
}

/// Optional animal fields shared by `add` and `update`.
#[derive(Args, Clone, Default)]
pub(crate) struct AnimalFields {
    /// Birth date (YYYY-MM-DD)
    #[arg(long, value_parser = date_arg)]
    pub birth_date: Option<NaiveDate>,

    /// Arrival date (YYYY-MM-DD)
    #[arg(long, value_parser = date_arg)]
    pub arrival_date: Option<NaiveDate>,

    /// unknown, female or male
    #[arg(long, value_parser = gender_arg)]
    pub gender: Option<Gender>,

    #[arg(long)]
    pub breed: Option<String>,

    #[arg(long)]
    pub character: Option<String>,

    #[arg(long)]
    pub color: Option<String>,

    /// Identification chip number
    #[arg(long)]
    pub implant: Option<String>,

    #[arg(long)]
    pub neutered: Option<bool>,

    #[arg(long)]
    pub history: Option<String>,

    /// Food habit id
    #[arg(long)]
    pub food_habit: Option<Id>,

    /// Picture file to upload (repeatable)
    #[arg(long = "picture")]
    pub pictures: Vec<PathBuf>,

    /// Dogs only: gets along with cats
    #[arg(long)]
    pub ok_cats: Option<bool>,

    /// Dogs only: dangerous-dog category (0, 1 or 2)
    #[arg(long, value_parser = clap::value_parser!(i64).range(0..=2))]
    pub category: Option<i64>,

    /// Cats only: FIV positive
    #[arg(long)]
    pub fiv: Option<bool>,

    /// Cats only: FeLV positive
    #[arg(long)]
    pub felv: Option<bool>,
}

// ── Cares and labels ────────────────────────────────────────────────────────

#[derive(Subcommand)]
pub(crate) enum CareAction {
    List,

    /// Add a care to the catalogue
    Add {
        /// Kind of care (vaccine, deworming, ...)
        care_type: String,

        #[command(flatten)]
        fields: CareFields,
    },

    Update {
        id: Id,

        #[arg(long = "type")]
        care_type: Option<String>,

        #[command(flatten)]
        fields: CareFields,
    },

    Delete { id: Id },
}

#[derive(Args, Clone, Default)]
pub(crate) struct CareFields {
    #[arg(long)]
    pub dose: Option<String>,

    /// How the care is given (injection, pill, ...)
    #[arg(long)]
    pub way: Option<String>,

    #[arg(long)]
    pub medecine: Option<String>,

    #[arg(long)]
    pub description: Option<String>,
}

#[derive(Subcommand)]
pub(crate) enum LabelAction {
    List,

    Add {
        label: String,

        #[arg(long, default_value = "")]
        description: String,
    },

    Update {
        id: Id,

        #[arg(long)]
        label: Option<String>,

        #[arg(long)]
        description: Option<String>,
    },

    Delete { id: Id },
}

// ── Boxes and locations ─────────────────────────────────────────────────────

#[derive(Subcommand)]
pub(crate) enum BoxAction {
    /// List boxes with how many dogs and cats each can hold
    List,

    Add {
        label: String,

        /// Surface in square meters
        #[arg(long)]
        surface: i64,

        #[arg(long, default_value = "")]
        description: String,

        #[arg(long, default_value = "")]
        position: String,

        #[arg(long, default_value = "")]
        condition: String,

        #[arg(long, default_value = "")]
        particularity: String,
    },

    Delete { id: Id },
}

#[derive(Subcommand)]
pub(crate) enum LocationAction {
    List,

    Add {
        /// box, vet, foster-family or other
        #[arg(value_parser = location_type_arg)]
        location_type: LocationType,

        /// Box id, for box locations
        #[arg(long = "box")]
        box_id: Option<Id>,

        /// Person id from the person directory
        #[arg(long)]
        person: Option<Id>,
    },
}

// ── Sheets ──────────────────────────────────────────────────────────────────

#[derive(Subcommand)]
pub(crate) enum SheetAction {
    List {
        /// Only sheets of this animal
        #[arg(long)]
        animal: Option<Id>,
    },

    /// Record a new sheet; it becomes the animal's latest one
    Add {
        animal: Id,

        #[arg(long)]
        state: Option<Id>,

        #[arg(long)]
        location: Option<Id>,

        /// Defaults to today
        #[arg(long, value_parser = date_arg)]
        date: Option<NaiveDate>,
    },
}

#[derive(Subcommand)]
pub(crate) enum CareSheetAction {
    List {
        /// Only care sheets of this animal
        #[arg(long)]
        animal: Option<Id>,
    },

    Add {
        animal: Id,

        care: Id,

        /// Defaults to today
        #[arg(long, value_parser = date_arg)]
        date: Option<NaiveDate>,

        /// HH:MM or HH:MM:SS
        #[arg(long, value_parser = time_arg)]
        time: Option<NaiveTime>,

        #[arg(long, default_value = "")]
        frequency: String,

        /// Person id of whoever gave the care
        #[arg(long)]
        given_by: Option<Id>,

        #[arg(long, default_value = "")]
        prescription: String,

        #[arg(long, default_value = "")]
        dosage: String,
    },
}

// ── Plugins and config ──────────────────────────────────────────────────────

#[derive(Subcommand)]
pub(crate) enum PluginAction {
    /// List plugins, their state and configuration
    List,

    /// List persons from the loaded person directory
    Persons,
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show resolved paths and their sources
    Show,

    /// Print the settings file path
    Path,
}
