use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use graphblog_client::{AuthData, BlogClient, BlogClientError, Post, PostsPage, User};

const TOKEN_FILE: &str = ".graphblog_token";
const DEFAULT_SERVER: &str = "http://127.0.0.1:8080";
const SERVER_ENV: &str = "GRAPHBLOG_SERVER";

#[derive(Debug, Parser)]
#[command(name = "graphblog-cli", version, about = "CLI клиент для graphblog-server")]
struct Cli {
    /// Адрес сервера. По умолчанию `GRAPHBLOG_SERVER` или http://127.0.0.1:8080.
    #[arg(long, global = true)]
    server: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Регистрация пользователя.
    Signup {
        #[arg(long)]
        email: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        password: String,
    },
    /// Вход пользователя, токен сохраняется в .graphblog_token.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Создание поста (требует токен).
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
        /// Путь картинки, полученный командой `upload`.
        #[arg(long)]
        image: String,
    },
    /// Получение поста по id (требует токен).
    Get {
        #[arg(long)]
        id: String,
    },
    /// Страница ленты (требует токен).
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Обновление поста (требует токен).
    ///
    /// Если `--content` не указан, используется текущее содержимое поста.
    /// Если `--image` не указан, картинка остаётся прежней.
    Update {
        #[arg(long)]
        id: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        image: Option<String>,
    },
    /// Удаление поста вместе с картинкой (требует токен).
    Delete {
        #[arg(long)]
        id: String,
    },
    /// Загрузка картинки png/jpeg (требует токен).
    Upload {
        #[arg(long)]
        file: PathBuf,
        /// Предыдущая картинка, которую нужно удалить.
        #[arg(long)]
        old_path: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Ошибка: {err:#}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let server = resolve_server(cli.server, std::env::var(SERVER_ENV).ok());
    let mut client = BlogClient::new(server);

    if let Some(token) = load_token().context("не удалось прочитать .graphblog_token")? {
        client.set_token(token);
    }

    match cli.command {
        Command::Signup {
            email,
            name,
            password,
        } => {
            let user = client
                .create_user(&email, &name, &password)
                .await
                .map_err(map_client_error)?;
            print_user("Регистрация успешна, теперь выполните login", &user);
        }
        Command::Login { email, password } => {
            let auth = client
                .login(&email, &password)
                .await
                .map_err(map_client_error)?;
            persist_token(&client).context("не удалось сохранить токен")?;
            print_auth("Вход выполнен", &auth);
        }
        Command::Create {
            title,
            content,
            image,
        } => {
            let post = client
                .create_post(&title, &content, &image)
                .await
                .map_err(map_client_error)?;
            print_post("Пост создан", &post);
        }
        Command::Get { id } => {
            let post = client.get_post(&id).await.map_err(map_client_error)?;
            print_post("Пост", &post);
        }
        Command::List { page } => {
            let posts = client.get_posts(page).await.map_err(map_client_error)?;
            print_page(page, &posts);
        }
        Command::Update {
            id,
            title,
            content,
            image,
        } => {
            let content = match content {
                Some(content) => content,
                None => client.get_post(&id).await.map_err(map_client_error)?.content,
            };

            let post = client
                .update_post(&id, &title, &content, image.as_deref())
                .await
                .map_err(map_client_error)?;
            print_post("Пост обновлён", &post);
        }
        Command::Delete { id } => {
            let message = client.delete_post(&id).await.map_err(map_client_error)?;
            println!("{message}: id={id}");
        }
        Command::Upload { file, old_path } => {
            let mime = guess_mime(&file);
            let bytes = fs::read(&file)
                .with_context(|| format!("не удалось прочитать {}", file.display()))?;
            let file_name = file
                .file_name()
                .and_then(|name| name.to_str())
                .unwrap_or("image");

            let stored = client
                .upload_image(file_name, mime, bytes, old_path.as_deref())
                .await
                .map_err(map_client_error)?;
            match stored {
                Some(path) => println!("Файл сохранён: {path}"),
                None => println!("Сервер не принял файл: допустимы только png и jpeg"),
            }
        }
    }

    Ok(())
}

fn resolve_server(flag: Option<String>, env: Option<String>) -> String {
    let raw = flag
        .or(env)
        .filter(|server| !server.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_SERVER.to_string());
    normalize_server(raw)
}

fn normalize_server(server: String) -> String {
    if server.starts_with("http://") || server.starts_with("https://") {
        return server;
    }

    format!("http://{server}")
}

fn guess_mime(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        _ => "application/octet-stream",
    }
}

fn parse_token_content(raw: &str) -> Option<String> {
    let token = raw.trim().to_string();
    if token.is_empty() {
        return None;
    }
    Some(token)
}

fn load_token() -> io::Result<Option<String>> {
    if !Path::new(TOKEN_FILE).exists() {
        return Ok(None);
    }

    let raw = fs::read_to_string(TOKEN_FILE)?;
    Ok(parse_token_content(&raw))
}

fn persist_token(client: &BlogClient) -> io::Result<()> {
    if let Some(token) = client.get_token() {
        fs::write(TOKEN_FILE, token)?;
    }
    Ok(())
}

fn map_client_error(err: BlogClientError) -> anyhow::Error {
    let message = match err {
        BlogClientError::Unauthorized(message) => format!(
            "требуется авторизация ({message}): выполните `graphblog-cli login ...`"
        ),
        BlogClientError::Forbidden(_) => "пост принадлежит другому пользователю".to_string(),
        BlogClientError::NotFound(message) => format!("не найдено: {message}"),
        BlogClientError::InvalidInput(messages) => {
            format!("некорректные данные: {}", messages.join("; "))
        }
        BlogClientError::Server { status, message } => match status {
            Some(status) => format!("ошибка сервера ({status}): {message}"),
            None => format!("ошибка сервера: {message}"),
        },
        BlogClientError::Http(err) => format!("ошибка HTTP: {err}"),
        BlogClientError::Decode(message) => format!("непонятный ответ сервера: {message}"),
    };
    anyhow::anyhow!(message)
}

fn print_user(title: &str, user: &User) {
    println!("{title}");
    println!("id: {}", user.id);
    println!("name: {}", user.name);
    println!("email: {}", user.email);
    println!("status: {}", user.status);
}

fn print_auth(title: &str, auth: &AuthData) {
    println!("{title}");
    println!("token: {}", auth.token);
    println!("user_id: {}", auth.user_id);
}

fn print_post(title: &str, post: &Post) {
    println!("{title}");
    println!("id: {}", post.id);
    println!("title: {}", post.title);
    println!("content: {}", post.content);
    println!("image: {}", post.image_url);
    println!("creator: {} ({})", post.creator.name, post.creator.id);
    println!("created_at: {}", post.created_at);
    println!("updated_at: {}", post.updated_at);
}

fn print_page(page: u32, posts: &PostsPage) {
    println!(
        "Страница {page}: постов {} (всего {})",
        posts.posts.len(),
        posts.total_posts
    );

    for post in &posts.posts {
        println!("- [{}] {} ({})", post.id, post.title, post.creator.name);
    }
}
