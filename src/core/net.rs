// src/core/net.rs

// HTTP/1.0 GET over TCP (std-only)

use std::{io::{Read, Write}, net::TcpStream, time::Duration};

use log::debug;

use crate::config::consts::{HOST, USER_AGENT};
use crate::error::{Result, ScrapeError};

/// GET `path` (absolute path + query, e.g. `/Pages/Card/Details.aspx?multiverseid=1`) from the site.
pub fn http_get(path: &str) -> Result<String> {
    let mut s = TcpStream::connect((HOST, 80))?;
    s.set_read_timeout(Some(Duration::from_secs(15)))?;
    s.set_write_timeout(Some(Duration::from_secs(15)))?;

    let req = format!(
        "GET {} HTTP/1.0\r\nHost: {}\r\nUser-Agent: {}\r\nConnection: close\r\n\r\n",
        path, HOST, USER_AGENT
    );
    s.write_all(req.as_bytes())?;
    s.flush()?;

    let mut buf = Vec::new();
    s.read_to_end(&mut buf)?;
    let resp = String::from_utf8_lossy(&buf);
    debug!("GET {} -> {} bytes", path, buf.len());

    split_response(&resp, path)
}

/// GET a full `http://host/...` URL; only the configured host is accepted.
pub fn http_get_url(url: &str) -> Result<String> {
    http_get(&path_of(url)?)
}

fn path_of(url: &str) -> Result<String> {
    let rest = url
        .strip_prefix("http://")
        .or_else(|| url.strip_prefix("https://"))
        .unwrap_or(url);
    match rest.find('/') {
        Some(i) if rest[..i].eq_ignore_ascii_case(HOST) => Ok(s!(&rest[i..])),
        None if rest.eq_ignore_ascii_case(HOST) => Ok(s!("/")),
        _ if url.starts_with('/') => Ok(s!(url)),
        _ => Err(ScrapeError::Http(format!("not a {} url: {}", HOST, url))),
    }
}

fn split_response(resp: &str, path: &str) -> Result<String> {
    let status = resp.split("\r\n").next().unwrap_or("");
    let code = status.split_whitespace().nth(1).unwrap_or("");
    if code != "200" {
        return Err(ScrapeError::Http(format!("{} {}{}", status, HOST, path)));
    }
    let body_idx = resp
        .find("\r\n\r\n")
        .ok_or_else(|| ScrapeError::Http(s!("Malformed HTTP response")))?
        + 4;
    Ok(resp[body_idx..].to_string())
}
