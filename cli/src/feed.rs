//! The headlines-and-messages screen, rendered as text.

use std::io::{self, Write};

use fetch_core::{FetchClient, Message, News, Result, RetryPolicy, Transport, HEADLINES, MESSAGES};

/// Both collections shown on the feed screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feed {
    pub headlines: Vec<News>,
    pub messages: Vec<Message>,
}

/// Fetch headlines and messages concurrently, each under its own retry
/// budget. Either failure fails the whole feed.
pub async fn fetch_feed<T: Transport>(
    client: &FetchClient<T>,
    policy: RetryPolicy,
) -> Result<Feed> {
    let (headlines, messages) = tokio::join!(
        client.fetch_with_retry(&HEADLINES, policy),
        client.fetch_with_retry(&MESSAGES, policy),
    );
    Ok(Feed {
        headlines: headlines?,
        messages: messages?,
    })
}

pub fn render(feed: &Feed, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Headlines")?;
    for news in &feed.headlines {
        writeln!(out, "  {}", news.title)?;
        writeln!(out, "    {}", news.strap)?;
    }
    writeln!(out)?;
    writeln!(out, "Messages")?;
    for message in &feed.messages {
        writeln!(out, "  {}", message.from)?;
        writeln!(out, "    {}", message.text)?;
    }
    Ok(())
}
