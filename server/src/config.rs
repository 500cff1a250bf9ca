use clap::{Parser, ValueEnum};

/// Which `TodoStore` backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StoreKind {
    Mongo,
    Memory,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "todo-server")]
#[command(about = "HTTP service for todo lists and their tasks")]
pub struct Config {
    /// Address to bind
    #[arg(long, default_value = "127.0.0.1", env = "TODO_HOST")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = 8080, env = "TODO_PORT")]
    pub port: u16,

    /// Storage backend
    #[arg(long, value_enum, default_value_t = StoreKind::Mongo, env = "TODO_STORE")]
    pub store: StoreKind,

    /// MongoDB connection string
    #[arg(long, default_value = "mongodb://127.0.0.1:27017", env = "MONGO_URI")]
    pub mongo_uri: String,

    /// Database holding the lists collection
    #[arg(long, default_value = "todo_server", env = "TODO_DATABASE")]
    pub database: String,

    /// Collection holding one document per list
    #[arg(long, default_value = "todo", env = "TODO_COLLECTION")]
    pub collection: String,

    /// Drop the database when the server shuts down
    #[arg(long, env = "TODO_DROP_ON_SHUTDOWN")]
    pub drop_on_shutdown: bool,
}

impl Config {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
