//! Command-line arguments

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use studybuddy_core::models::ConversationType;
use studybuddy_core::StudySource;

#[derive(Debug, Parser)]
#[command(name = "studybuddy", version, about = "StudyBuddy study platform client")]
pub struct Cli {
    /// API root (defaults to $STUDYBUDDY_API_URL or http://localhost:5000/api)
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,
    /// Directory holding the local store (defaults to $STUDYBUDDY_DATA_DIR)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in and store the session token
    Login {
        #[arg(long)]
        email: String,
        /// Read from stdin when omitted
        #[arg(long)]
        password: Option<String>,
    },
    /// Create an account and sign in
    Register(RegisterArgs),
    /// Forget the stored session token
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Resolve a page path and render the navigation bar
    Nav {
        #[arg(default_value = "/")]
        path: String,
    },
    /// Study stats, achievements and weekly goal
    Dashboard,
    /// Study rooms
    Rooms {
        #[command(subcommand)]
        cmd: RoomsCmd,
    },
    /// Uploaded documents
    Documents {
        #[command(subcommand)]
        cmd: DocumentsCmd,
    },
    /// AI tutor conversations and generated study material
    Tutor {
        #[command(subcommand)]
        cmd: TutorCmd,
    },
    /// Profile and subscription
    Profile {
        #[command(subcommand)]
        cmd: ProfileCmd,
    },
}

#[derive(Debug, Args)]
pub struct RegisterArgs {
    #[arg(long)]
    pub username: String,
    #[arg(long)]
    pub email: String,
    /// Read from stdin when omitted
    #[arg(long)]
    pub password: Option<String>,
    #[arg(long, default_value = "")]
    pub first_name: String,
    #[arg(long, default_value = "")]
    pub last_name: String,
}

#[derive(Debug, Subcommand)]
pub enum RoomsCmd {
    /// List visible rooms
    List,
    /// Create a room
    Create {
        name: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        subject: Option<String>,
        #[arg(long, value_name = "COUNT")]
        max_participants: Option<u32>,
        #[arg(long, action = ArgAction::SetTrue)]
        private: bool,
    },
    /// Show a room with its members
    Show { room_id: i64 },
    Join { room_id: i64 },
    /// Join a private room by its invite code
    JoinCode { code: String },
    Leave { room_id: i64 },
    /// Start a study session in a room
    Start { room_id: i64 },
    /// End a study session
    End { room_id: i64, session_id: i64 },
    /// Show the whiteboard, or replace it with --set
    Whiteboard {
        room_id: i64,
        #[arg(long, value_name = "JSON")]
        set: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum DocumentsCmd {
    List,
    Summarize { document_id: i64 },
}

#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
pub struct SourceArgs {
    /// Generate from this text
    #[arg(long)]
    pub text: Option<String>,
    /// Generate from an uploaded document
    #[arg(long, value_name = "ID")]
    pub document: Option<i64>,
}

impl SourceArgs {
    pub fn to_source(&self) -> StudySource {
        match (&self.text, self.document) {
            (_, Some(id)) => StudySource::Document(id),
            (Some(text), None) => StudySource::Text(text.clone()),
            (None, None) => StudySource::Text(String::new()),
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum TutorCmd {
    /// List conversations
    Conversations,
    /// Start a conversation
    New {
        /// qa, summary, flashcard or practice-test
        #[arg(long = "type", default_value = "qa")]
        conversation_type: ConversationType,
        #[arg(long)]
        title: Option<String>,
        #[arg(long, value_name = "ROOM_ID")]
        room: Option<i64>,
    },
    /// Show a conversation's messages
    Messages { conversation_id: i64 },
    /// Ask the tutor
    Send {
        conversation_id: i64,
        content: String,
    },
    /// List flashcards
    Flashcards,
    GenerateFlashcards {
        #[command(flatten)]
        source: SourceArgs,
        #[arg(long, default_value_t = 10)]
        count: u32,
        #[arg(long)]
        category: Option<String>,
    },
    /// Record a flashcard review
    Review {
        flashcard_id: i64,
        #[arg(long, action = ArgAction::SetTrue, conflicts_with = "incorrect")]
        correct: bool,
        #[arg(long, action = ArgAction::SetTrue)]
        incorrect: bool,
    },
    /// List practice tests
    Tests,
    GenerateTest {
        #[command(flatten)]
        source: SourceArgs,
        #[arg(long, default_value_t = 10)]
        count: u32,
        #[arg(long)]
        title: Option<String>,
    },
    Summarize {
        #[command(flatten)]
        source: SourceArgs,
    },
}

#[derive(Debug, Subcommand)]
pub enum ProfileCmd {
    Show,
    /// Update profile fields for this run only, e.g. `first_name=Ada`.
    /// Changes are not sent to the server and are lost on exit.
    Set {
        #[arg(value_name = "KEY=VALUE", required = true)]
        assignments: Vec<String>,
    },
    Subscription,
    Payments,
    /// Start a premium payment and print the checkout URL
    Upgrade {
        #[arg(default_value = "premium_yearly")]
        plan_id: String,
    },
    /// Cancel the premium subscription
    Cancel,
}
