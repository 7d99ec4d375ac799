use clap::{Parser, Subcommand};
use reqwest::{header::LOCATION, redirect::Policy, RequestBuilder};
use serde_json::Value;
use url::Url;

#[derive(Parser)]
#[command(name = "httpbin-cli")]
#[command(about = "Probe a running httpbin instance", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8000")]
    url: Url,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the X-Forwarded-For chain the server saw
    Ip {
        /// Values to send as separate X-Forwarded-For headers
        #[arg(long = "forwarded-for")]
        forwarded_for: Vec<String>,
    },
    /// Echo query parameters
    Get {
        #[arg(value_parser = parse_pair)]
        params: Vec<(String, String)>,
    },
    /// Echo request headers
    Headers {
        /// Extra headers as NAME=VALUE
        #[arg(value_parser = parse_pair)]
        headers: Vec<(String, String)>,
    },
    /// Echo cookies sent as NAME=VALUE
    Cookies {
        #[arg(value_parser = parse_pair)]
        cookies: Vec<(String, String)>,
    },
    /// Ask the server to set cookies and show the Set-Cookie headers
    SetCookies {
        #[arg(value_parser = parse_pair)]
        cookies: Vec<(String, String)>,
    },
    /// Ask the server to expire cookies and show the Set-Cookie headers
    DeleteCookies { names: Vec<String> },
    /// Call /basic-auth/USER/PASS, by default with matching credentials
    BasicAuth {
        user: String,
        pass: String,
        /// Send these credentials instead, as USER:PASS
        #[arg(long = "as")]
        credentials: Option<String>,
    },
    /// Follow /relative-redirect/TIMES hop by hop
    Redirect {
        times: u64,
        #[arg(long, default_value_t = 50)]
        max_hops: usize,
    },
}

fn parse_pair(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        Some(_) => Err(format!("empty name in {raw:?}")),
        None => Ok((raw.to_string(), String::new())),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::builder().redirect(Policy::none()).build()?;
    let base = cli.url;

    match cli.command {
        Commands::Ip { forwarded_for } => {
            let mut request = client.get(base.join("/ip")?);
            for value in forwarded_for {
                request = request.header("x-forwarded-for", value);
            }
            print_response(request).await?;
        }
        Commands::Get { params } => {
            print_response(client.get(base.join("/get")?).query(&params)).await?;
        }
        Commands::Headers { headers } => {
            let mut request = client.get(base.join("/headers")?);
            for (name, value) in headers {
                request = request.header(name, value);
            }
            print_response(request).await?;
        }
        Commands::Cookies { cookies } => {
            let cookie = cookies
                .iter()
                .map(|(name, value)| format!("{name}={value}"))
                .collect::<Vec<_>>()
                .join("; ");
            let mut request = client.get(base.join("/cookies")?);
            if !cookie.is_empty() {
                request = request.header("cookie", cookie);
            }
            print_response(request).await?;
        }
        Commands::SetCookies { cookies } => {
            print_set_cookies(client.get(base.join("/cookies/set")?).query(&cookies)).await?;
        }
        Commands::DeleteCookies { names } => {
            let keys: Vec<(String, String)> = names.into_iter().map(|n| (n, String::new())).collect();
            print_set_cookies(client.get(base.join("/cookies/delete")?).query(&keys)).await?;
        }
        Commands::BasicAuth { user, pass, credentials } => {
            let (send_user, send_pass) = match credentials {
                Some(raw) => match raw.split_once(':') {
                    Some((u, p)) => (u.to_string(), p.to_string()),
                    None => (raw, String::new()),
                },
                None => (user.clone(), pass.clone()),
            };
            let mut url = base.clone();
            url.path_segments_mut()
                .map_err(|_| "base URL cannot have a path")?
                .clear()
                .extend(["basic-auth", user.as_str(), pass.as_str()]);
            let request = client.get(url).basic_auth(send_user, Some(send_pass));
            print_response(request).await?;
        }
        Commands::Redirect { times, max_hops } => {
            let mut url = base.join(&format!("/relative-redirect/{times}"))?;
            for hop in 1..=max_hops {
                let res = client.get(url.clone()).send().await?;
                let status = res.status();
                println!("{hop:>3} {status} {}", url.path());
                if !status.is_redirection() {
                    return Ok(());
                }
                let location = res
                    .headers()
                    .get(LOCATION)
                    .ok_or("redirect without Location")?
                    .to_str()?;
                url = url.join(location)?;
            }
            eprintln!("Error: gave up after {max_hops} hops at {}", url.path());
        }
    }

    Ok(())
}

async fn print_set_cookies(request: RequestBuilder) -> Result<(), Box<dyn std::error::Error>> {
    let res = request.send().await?;
    println!("{}", res.status());
    if let Some(location) = res.headers().get(LOCATION) {
        println!("location: {}", location.to_str()?);
    }
    for cookie in res.headers().get_all("set-cookie") {
        println!("set-cookie: {}", cookie.to_str()?);
    }
    Ok(())
}

async fn print_response(request: RequestBuilder) -> Result<(), Box<dyn std::error::Error>> {
    let res = request.send().await?;
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: server returned status {}", status);
        if let Some(challenge) = res.headers().get("www-authenticate") {
            eprintln!("www-authenticate: {}", challenge.to_str()?);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
