use crate::model::{GuildId, LeaderboardPage, Record};
use crate::Error;

use reqwest::header;

pub const DEFAULT_API_URL: &str = "https://mee6.xyz";

// The API is picky about non-browser traffic, so we pretend to be one
const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:109.0) Gecko/20100101 Firefox/115.0";

/// Anything that can hand out leaderboard pages by index
pub trait LeaderboardSource {
    fn fetch_page(&self, page: u32) -> Result<Vec<Record>, Error>;
}

impl<S: LeaderboardSource + ?Sized> LeaderboardSource for &S {
    fn fetch_page(&self, page: u32) -> Result<Vec<Record>, Error> {
        (**self).fetch_page(page)
    }
}

pub struct Mee6Client {
    http: reqwest::blocking::Client,
    api_url: String,
    guild: GuildId,
    auth: String,
    limit: Option<u32>,
    browser_headers: bool,
}

impl Mee6Client {
    pub fn new(config: &crate::Config) -> Self {
        Self {
            http: reqwest::blocking::Client::new(),
            api_url: config.api_url.trim_end_matches('/').to_owned(),
            guild: config.guild,
            auth: config.auth.clone(),
            limit: config.limit,
            browser_headers: config.browser_headers,
        }
    }

    fn leaderboard_url(&self) -> String {
        format!(
            "{}/api/plugins/levels/leaderboard/{}",
            self.api_url, self.guild
        )
    }

    fn build_request(&self, page: u32) -> Result<reqwest::blocking::Request, Error> {
        let mut request = self
            .http
            .get(self.leaderboard_url())
            .header(header::AUTHORIZATION, &self.auth)
            .query(&[("page", page)]);
        if let Some(limit) = self.limit {
            request = request.query(&[("limit", limit)]);
        }
        if self.browser_headers {
            request = request
                .header(
                    header::REFERER,
                    format!("https://mee6.xyz/leaderboard/{}", self.guild),
                )
                .header(header::USER_AGENT, BROWSER_USER_AGENT);
        }
        Ok(request.build()?)
    }
}

impl LeaderboardSource for Mee6Client {
    fn fetch_page(&self, page: u32) -> Result<Vec<Record>, Error> {
        log::debug!("requesting page {} of guild {}", page, self.guild);

        let response: LeaderboardPage = self
            .http
            .execute(self.build_request(page)?)?
            .error_for_status()?
            .json()?;

        Ok(response.players)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PlayerId;
    use crate::{Config, OutputMode};
    use std::io::{Read, Write};
    use std::net::TcpListener;

    fn config(limit: Option<u32>, browser_headers: bool) -> Config {
        Config {
            auth: "secret-token".into(),
            guild: GuildId(4242),
            api_url: "http://localhost:8080/".into(),
            limit,
            browser_headers,
            output: OutputMode::Json { levels: false },
            out: None,
        }
    }

    #[test]
    fn hardened_request() {
        let client = Mee6Client::new(&config(Some(1000), true));
        let request = client.build_request(3).unwrap();

        assert_eq!(request.method(), reqwest::Method::GET);
        assert_eq!(
            request.url().as_str(),
            "http://localhost:8080/api/plugins/levels/leaderboard/4242?page=3&limit=1000"
        );
        let headers = request.headers();
        assert_eq!(headers[header::AUTHORIZATION], "secret-token");
        assert_eq!(
            headers[header::REFERER],
            "https://mee6.xyz/leaderboard/4242"
        );
        assert_eq!(headers[header::USER_AGENT], BROWSER_USER_AGENT);
    }

    #[test]
    fn plain_request() {
        let client = Mee6Client::new(&config(None, false));
        let request = client.build_request(0).unwrap();

        assert_eq!(
            request.url().as_str(),
            "http://localhost:8080/api/plugins/levels/leaderboard/4242?page=0"
        );
        assert!(request.headers().get(header::REFERER).is_none());
        assert!(request.headers().get(header::USER_AGENT).is_none());
        assert_eq!(request.headers()[header::AUTHORIZATION], "secret-token");
    }

    /// Answers a single request on a local port with a canned response
    fn serve_once(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            write!(
                stream,
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            )
            .unwrap();
        });
        format!("http://{}", addr)
    }

    fn local_client(api_url: String) -> Mee6Client {
        Mee6Client {
            // don't let HTTP_PROXY from the environment get in between
            http: reqwest::blocking::Client::builder().no_proxy().build().unwrap(),
            ..Mee6Client::new(&Config {
                api_url,
                ..config(Some(1000), false)
            })
        }
    }

    #[test]
    fn response_handling() {
        let client = local_client(serve_once(
            "200 OK",
            r#"{"players": [{"id": "5", "xp": 3, "level": 0}]}"#,
        ));
        assert_eq!(
            client.fetch_page(0).unwrap(),
            vec![Record {
                id: PlayerId::Str("5".into()),
                xp: 3
            }]
        );

        let client = local_client(serve_once("401 Unauthorized", r#"{"error": "nope"}"#));
        let err = client.fetch_page(0).unwrap_err();
        assert!(err.to_string().contains("401"), "{}", err);

        let client = local_client(serve_once("200 OK", "<html>cloudflare</html>"));
        assert!(client.fetch_page(0).is_err());
    }
}
