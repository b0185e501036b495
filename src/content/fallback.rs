//! Embedded fallback dataset.
//!
//! Used whenever the primary data source is unreachable or serves a
//! malformed payload, so the site always has content to show. Shape matches
//! the remote protocol exactly; ids are dense starting at 1.

use super::types::{Article, ArticleIndex};

fn article(
    id: u32,
    title: &str,
    date: &str,
    author: &str,
    categories: &[&str],
    tags: &[&str],
    content: &str,
) -> Article {
    Article {
        id,
        title: title.to_string(),
        date: date.to_string(),
        author: author.to_string(),
        categories: categories.iter().map(|s| s.to_string()).collect(),
        tags: tags.iter().map(|s| s.to_string()).collect(),
        content: content.to_string(),
    }
}

/// Builds the embedded corpus, sorted ascending by id.
pub fn articles() -> Vec<Article> {
    vec![
        article(
            1,
            "Gazette #1",
            "May 21, 2025",
            "Gazette Team",
            &["Introduction", "Security"],
            &["welcome", "zero trust"],
            "![Gazette masthead](images/issue-1.png)\n\n\
             **Welcome to the Gazette.** Each issue is a short, focused read on one \
             engineering topic.\n\n\
             What you can expect:\n\n\
             - One topic per issue\n\
             - Concrete configuration examples\n\
             - Links to primary sources\n\n\
             Start with the archive, or jump straight to [2:Zero Trust in Practice].\n\n\
             Learn more: [editorial guidelines](https://example.com/gazette/about)",
        ),
        article(
            2,
            "Gazette #2",
            "May 22, 2025",
            "Security Desk",
            &["Security", "Tutorial"],
            &["zero trust", "getting started"],
            "# Zero Trust in Practice\n\n\
             Perimeter-only security assumes the inside is safe. Zero trust drops that \
             assumption: every request is authenticated and authorized.\n\n\
             ## Where to start\n\n\
             - Inventory every service-to-service call\n\
             - Issue workload identities\n\
             - Enforce policy at the edge *and* at the service\n\n\
             > Trust is not a network location.\n\n\
             ---\n\n\
             Further reading: [NIST SP 800-207](https://example.com/nist/800-207)",
        ),
        article(
            3,
            "Gazette #3",
            "May 23, 2025",
            "Platform Team",
            &["Web Development", "Tutorial"],
            &["HTML", "accessibility", "best practices"],
            "In this issue we cover semantic markup and why it is the cheapest \
             accessibility work you will ever do.\n\n\
             ## Semantic elements\n\n\
             Screen readers navigate by landmarks. Prefer `header`, `nav`, `main` and \
             `footer` over anonymous containers.\n\n\
             ## Heading order\n\n\
             Do not skip levels. A document that jumps from a top-level heading to a \
             third-level one reads like a broken outline.",
        ),
        article(
            4,
            "Gazette #4",
            "May 24, 2025",
            "Platform Team",
            &["Cloud Computing", "Tutorial"],
            &["deployment", "cloud"],
            "# Shipping Small Services\n\n\
             A deployment manifest is configuration, not code. Keep it declarative:\n\n\
             ```yaml\n\
             replicas: 3\n\
             strategy: RollingUpdate\n\
             # comments in manifests are fine\n\
             ```\n\n\
             The block above is **data** — nothing in it should be executed.\n\n\
             - Pin image digests\n\
             - Declare resource limits\n\
             - Fail closed on missing secrets",
        ),
        article(
            5,
            "Gazette #5",
            "May 25, 2025",
            "Security Desk",
            &["Security", "Advanced"],
            &["zero trust", "conditional access"],
            "![Issue five illustration](images/issue-5.png)\n\n\
             Still relying on a flat VPN for remote access? Identity-aware proxies make \
             access decisions from user, device and context — not network location.\n\n\
             **Granular controls**\n\n\
             Least-privilege policies limit lateral movement when credentials leak.\n\n\
             **Better performance**\n\n\
             No backhauling through a concentrator; traffic takes the short path.\n\n\
             Watch the walkthrough: [setup guide](https://example.com/videos/iap-setup)",
        ),
        article(
            6,
            "Gazette #6",
            "May 26, 2025",
            "Data Desk",
            &["Data Science"],
            &["pipelines", "testing"],
            "## Testing Data Pipelines\n\n\
             Pipelines fail quietly. Assert on *shape* as well as values:\n\n\
             - Row counts within expected bounds\n\
             - No unexpected nulls in key columns\n\
             - Schema drift detected before load\n\n\
             > A green pipeline with wrong data is worse than a red one.\n\n\
             Previous issue on deployments: [4:Shipping Small Services]",
        ),
    ]
}

/// The index view of the embedded corpus.
pub fn index() -> ArticleIndex {
    ArticleIndex {
        articles: articles().iter().map(Article::summary).collect(),
    }
}

/// Looks up a single embedded article by id.
pub fn article_by_id(id: u32) -> Option<Article> {
    articles().into_iter().find(|a| a.id == id)
}
