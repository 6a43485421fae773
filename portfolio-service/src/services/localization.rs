/// Blog payload normalization
///
/// Admin blog submissions arrive with possibly-partial bilingual fields.
/// This module merges the English/Spanish variants (either side falls back
/// to the other when blank), coerces tags from a JSON array or a
/// comma-separated string into a deduplicated trimmed list, and derives a
/// URL slug from the title when none is supplied.
///
/// Slug uniqueness is not checked here; the unique index on
/// `blog_posts.slug` is the enforcement point.
use serde::Deserialize;

/// Raw admin submission for creating or updating a blog post
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlogPayload {
    pub slug: Option<String>,
    pub title_en: Option<String>,
    pub title_es: Option<String>,
    pub subtitle_en: Option<String>,
    pub subtitle_es: Option<String>,
    pub content_en: Option<String>,
    pub content_es: Option<String>,
    pub footer_en: Option<String>,
    pub footer_es: Option<String>,
    pub bibliography_en: Option<String>,
    pub bibliography_es: Option<String>,
    pub tags: Option<TagsInput>,
    pub cover_image: Option<String>,
    pub published: Option<bool>,
}

/// Tags arrive either as a JSON array or as a comma-separated string
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TagsInput {
    List(Vec<String>),
    Csv(String),
}

/// Fully-populated record ready for the blog repository
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedBlog {
    pub slug: String,
    pub title_en: String,
    pub title_es: String,
    pub subtitle_en: String,
    pub subtitle_es: String,
    pub content_en: String,
    pub content_es: String,
    pub footer_en: String,
    pub footer_es: String,
    pub bibliography_en: String,
    pub bibliography_es: String,
    pub tags: Vec<String>,
    pub cover_image: Option<String>,
    pub published: bool,
}

/// Normalize a raw payload into a complete bilingual record.
///
/// Fails only when neither title variant is present, since the title is the
/// slug source and the one field the public pages cannot render without.
pub fn normalize_blog(payload: &BlogPayload) -> Result<NormalizedBlog, String> {
    let (title_en, title_es) = merge_pair(&payload.title_en, &payload.title_es);
    if title_en.is_empty() {
        return Err("blog payload requires a title in at least one language".to_string());
    }

    let (subtitle_en, subtitle_es) = merge_pair(&payload.subtitle_en, &payload.subtitle_es);
    let (content_en, content_es) = merge_pair(&payload.content_en, &payload.content_es);
    let (footer_en, footer_es) = merge_pair(&payload.footer_en, &payload.footer_es);
    let (bibliography_en, bibliography_es) =
        merge_pair(&payload.bibliography_en, &payload.bibliography_es);

    let slug = match payload.slug.as_deref().map(str::trim) {
        Some(slug) if !slug.is_empty() => slug.to_string(),
        _ => slugify(&title_en),
    };

    Ok(NormalizedBlog {
        slug,
        title_en,
        title_es,
        subtitle_en,
        subtitle_es,
        content_en,
        content_es,
        footer_en,
        footer_es,
        bibliography_en,
        bibliography_es,
        tags: normalize_tags(payload.tags.as_ref()),
        cover_image: payload
            .cover_image
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string),
        published: payload.published.unwrap_or(false),
    })
}

/// Merge a bilingual field pair: each side keeps its own value and falls
/// back to the other when blank.
fn merge_pair(en: &Option<String>, es: &Option<String>) -> (String, String) {
    let en_value = en.as_deref().map(str::trim).unwrap_or("");
    let es_value = es.as_deref().map(str::trim).unwrap_or("");

    let merged_en = if en_value.is_empty() { es_value } else { en_value };
    let merged_es = if es_value.is_empty() { en_value } else { es_value };

    (merged_en.to_string(), merged_es.to_string())
}

/// Coerce tags into a deduplicated, trimmed, order-preserving list
pub fn normalize_tags(tags: Option<&TagsInput>) -> Vec<String> {
    let raw: Vec<String> = match tags {
        Some(TagsInput::List(list)) => list.clone(),
        Some(TagsInput::Csv(csv)) => csv.split(',').map(str::to_string).collect(),
        None => return Vec::new(),
    };

    let mut seen = Vec::new();
    for tag in raw {
        let tag = tag.trim();
        if tag.is_empty() {
            continue;
        }
        if !seen.iter().any(|existing: &String| existing == tag) {
            seen.push(tag.to_string());
        }
    }
    seen
}

/// Derive a URL slug from a title: lowercase, Spanish diacritics folded to
/// ASCII, runs of non-alphanumerics collapsed to single dashes.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut last_dash = true; // suppress leading dash

    for ch in title.chars() {
        let folded = match ch {
            'á' | 'à' | 'ä' | 'â' => Some('a'),
            'é' | 'è' | 'ë' | 'ê' => Some('e'),
            'í' | 'ì' | 'ï' | 'î' => Some('i'),
            'ó' | 'ò' | 'ö' | 'ô' => Some('o'),
            'ú' | 'ù' | 'ü' | 'û' => Some('u'),
            'ñ' => Some('n'),
            _ => None,
        };

        let ch = folded.unwrap_or(ch);
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }

    // drop trailing dash
    if slug.ends_with('-') {
        slug.pop();
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload_with_titles(en: Option<&str>, es: Option<&str>) -> BlogPayload {
        BlogPayload {
            title_en: en.map(str::to_string),
            title_es: es.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_spanish_fields_fall_back_to_english() {
        let payload = BlogPayload {
            title_en: Some("Hello".into()),
            content_en: Some("English body".into()),
            footer_en: Some("English footer".into()),
            bibliography_en: Some("Smith 2020".into()),
            ..Default::default()
        };

        let blog = normalize_blog(&payload).unwrap();
        assert_eq!(blog.title_es, "Hello");
        assert_eq!(blog.content_es, "English body");
        assert_eq!(blog.footer_es, "English footer");
        assert_eq!(blog.bibliography_es, "Smith 2020");
    }

    #[test]
    fn test_english_fields_fall_back_to_spanish() {
        let payload = BlogPayload {
            title_es: Some("Hola".into()),
            content_es: Some("Cuerpo".into()),
            ..Default::default()
        };

        let blog = normalize_blog(&payload).unwrap();
        assert_eq!(blog.title_en, "Hola");
        assert_eq!(blog.content_en, "Cuerpo");
    }

    #[test]
    fn test_both_variants_kept_when_present() {
        let payload = BlogPayload {
            title_en: Some("Hello".into()),
            title_es: Some("Hola".into()),
            ..Default::default()
        };

        let blog = normalize_blog(&payload).unwrap();
        assert_eq!(blog.title_en, "Hello");
        assert_eq!(blog.title_es, "Hola");
    }

    #[test]
    fn test_blank_counts_as_missing() {
        let payload = BlogPayload {
            title_en: Some("Hello".into()),
            subtitle_en: Some("A subtitle".into()),
            subtitle_es: Some("   ".into()),
            ..Default::default()
        };

        let blog = normalize_blog(&payload).unwrap();
        assert_eq!(blog.subtitle_es, "A subtitle");
    }

    #[test]
    fn test_missing_title_rejected() {
        let payload = payload_with_titles(None, None);
        assert!(normalize_blog(&payload).is_err());

        let payload = payload_with_titles(Some("   "), Some(""));
        assert!(normalize_blog(&payload).is_err());
    }

    #[test]
    fn test_slug_taken_from_input() {
        let mut payload = payload_with_titles(Some("Some Title"), None);
        payload.slug = Some("custom-slug".into());

        let blog = normalize_blog(&payload).unwrap();
        assert_eq!(blog.slug, "custom-slug");
    }

    #[test]
    fn test_slug_derived_from_title() {
        let payload = payload_with_titles(Some("Building a Rust Backend!"), None);
        let blog = normalize_blog(&payload).unwrap();
        assert_eq!(blog.slug, "building-a-rust-backend");
    }

    #[test]
    fn test_slug_folds_spanish_diacritics() {
        assert_eq!(slugify("Programación en Español"), "programacion-en-espanol");
        assert_eq!(slugify("Año nuevo: ¡2026!"), "ano-nuevo-2026");
    }

    #[test]
    fn test_slugify_collapses_runs() {
        assert_eq!(slugify("  a -- b  "), "a-b");
        assert_eq!(slugify("Rust & WebAssembly"), "rust-webassembly");
    }

    #[test]
    fn test_tags_from_array_and_csv_match() {
        let from_list = normalize_tags(Some(&TagsInput::List(vec![
            "rust".into(),
            " web ".into(),
            "rust".into(),
        ])));
        let from_csv = normalize_tags(Some(&TagsInput::Csv("rust, web ,rust".into())));

        assert_eq!(from_list, vec!["rust", "web"]);
        assert_eq!(from_list, from_csv);
    }

    #[test]
    fn test_tags_drop_empties() {
        let tags = normalize_tags(Some(&TagsInput::Csv(",a,, b ,".into())));
        assert_eq!(tags, vec!["a", "b"]);
    }

    #[test]
    fn test_no_tags() {
        assert!(normalize_tags(None).is_empty());
    }
}
