use bytes::Bytes;
use clap::{Args, Subcommand};

use crate::client::ResourceClient;
use crate::error::DoubanError;

#[derive(Debug, Clone, Args)]
pub struct Paging {
    /// Offset of the first result
    #[arg(long, default_value_t = 0)]
    pub start: u32,

    /// Number of results
    #[arg(long, default_value_t = 20)]
    pub count: u32,
}

#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// Profile of the authorized user
    Me,
    /// User by numeric id
    Id { id: u64 },
    /// User by name
    Name { username: String },
    /// Search users
    Search {
        #[arg(required = true)]
        keywords: Vec<String>,
        #[command(flatten)]
        paging: Paging,
    },
}

#[derive(Debug, Subcommand)]
pub enum BookCommand {
    /// Book by id
    Id { id: u64 },
    /// Book by ISBN
    Isbn { isbn: String },
    /// Search books by keywords
    Search {
        #[arg(required = true)]
        keywords: Vec<String>,
        #[command(flatten)]
        paging: Paging,
    },
    /// Search books by tag
    Tag {
        tag: String,
        #[command(flatten)]
        paging: Paging,
    },
    /// Tags of a book
    Tags { id: u64 },
    /// Books collected by a user
    Collections { username: String },
    /// A user's collection entry for one book
    Collection { book_id: u64, username: String },
    /// Annotations written by a user
    UserAnnotations { username: String },
    /// Annotations on a book
    Annotations { book_id: u64 },
    /// Annotation by id
    Annotation { id: u64 },
}

#[derive(Debug, Subcommand)]
pub enum MovieCommand {
    /// Movie by subject id
    Id { id: u64 },
    /// Photos of a movie
    Photos { id: u64 },
    /// Reviews of a movie
    Reviews { id: u64 },
    /// Short comments on a movie
    Comments { id: u64 },
    /// Search movies by keywords
    Search {
        #[arg(required = true)]
        keywords: Vec<String>,
        #[command(flatten)]
        paging: Paging,
    },
    /// Search movies by tag
    Tag {
        tag: String,
        #[command(flatten)]
        paging: Paging,
    },
    /// Movies in theaters now
    NowPlaying,
    /// Movies coming soon
    Coming,
    /// Top 250 chart
    Top250,
    /// Weekly word-of-mouth chart
    Weekly,
    /// North American box office
    UsBox,
    /// New movies chart
    New,
}

#[derive(Debug, Subcommand)]
pub enum CelebrityCommand {
    /// Celebrity by id
    Id { id: u64 },
    /// Photos of a celebrity
    Photos { id: u64 },
    /// Works of a celebrity
    Works { id: u64 },
}

pub async fn run_user(client: &ResourceClient, cmd: UserCommand) -> Result<Bytes, DoubanError> {
    match cmd {
        UserCommand::Me => client.me().await,
        UserCommand::Id { id } => client.user_by_id(id).await,
        UserCommand::Name { username } => client.user_by_name(&username).await,
        UserCommand::Search { keywords, paging } => {
            client.search_users(&keywords, paging.start, paging.count).await
        }
    }
}

pub async fn run_book(client: &ResourceClient, cmd: BookCommand) -> Result<Bytes, DoubanError> {
    match cmd {
        BookCommand::Id { id } => client.book_by_id(id).await,
        BookCommand::Isbn { isbn } => client.book_by_isbn(&isbn).await,
        BookCommand::Search { keywords, paging } => {
            client.search_books(&keywords, paging.start, paging.count).await
        }
        BookCommand::Tag { tag, paging } => {
            client.search_books_by_tag(&tag, paging.start, paging.count).await
        }
        BookCommand::Tags { id } => client.book_tags(id).await,
        BookCommand::Collections { username } => client.user_book_collections(&username).await,
        BookCommand::Collection { book_id, username } => {
            client.user_book_collection(book_id, &username).await
        }
        BookCommand::UserAnnotations { username } => client.user_annotations(&username).await,
        BookCommand::Annotations { book_id } => client.book_annotations(book_id).await,
        BookCommand::Annotation { id } => client.annotation(id).await,
    }
}

pub async fn run_movie(client: &ResourceClient, cmd: MovieCommand) -> Result<Bytes, DoubanError> {
    match cmd {
        MovieCommand::Id { id } => client.movie(id).await,
        MovieCommand::Photos { id } => client.movie_photos(id).await,
        MovieCommand::Reviews { id } => client.movie_reviews(id).await,
        MovieCommand::Comments { id } => client.movie_comments(id).await,
        MovieCommand::Search { keywords, paging } => {
            client.search_movies(&keywords, paging.start, paging.count).await
        }
        MovieCommand::Tag { tag, paging } => {
            client.search_movies_by_tag(&tag, paging.start, paging.count).await
        }
        MovieCommand::NowPlaying => client.now_playing().await,
        MovieCommand::Coming => client.coming_soon().await,
        MovieCommand::Top250 => client.top250().await,
        MovieCommand::Weekly => client.weekly().await,
        MovieCommand::UsBox => client.us_box().await,
        MovieCommand::New => client.new_movies().await,
    }
}

pub async fn run_celebrity(
    client: &ResourceClient,
    cmd: CelebrityCommand,
) -> Result<Bytes, DoubanError> {
    match cmd {
        CelebrityCommand::Id { id } => client.celebrity(id).await,
        CelebrityCommand::Photos { id } => client.celebrity_photos(id).await,
        CelebrityCommand::Works { id } => client.celebrity_works(id).await,
    }
}
