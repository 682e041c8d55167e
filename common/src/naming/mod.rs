//! Download filename derivation for exported documents.

use regex::Regex;

/// Derives the `.html` filename for a document export.
///
/// The general rule lower-cases the title and replaces spaces with hyphens.
/// Lesson-material documents ("Bahan Ajar") that carry `[Mapel: ...]` and
/// `[Pertemuan: ...]` metadata tags in their content get a filename built
/// from those tags instead, so per-meeting exports of the same material do
/// not collide.
pub fn derive_filename(title: &str, html: &str) -> String {
    if title.to_lowercase().contains("bahan ajar") {
        if let (Some(subject), Some(meeting)) =
            (metadata_tag(html, "Mapel"), metadata_tag(html, "Pertemuan"))
        {
            return format!("bahan-ajar-{}-pertemuan-{}.html", slug(&subject), slug(&meeting));
        }
    }
    format!("{}.html", slug(title))
}

fn slug(text: &str) -> String {
    text.trim().to_lowercase().replace(' ', "-")
}

fn metadata_tag(html: &str, tag: &str) -> Option<String> {
    let re = Regex::new(&format!(r"\[{}: ([^\]]+)\]", tag)).unwrap();
    re.captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_is_lowercased_and_hyphenated() {
        assert_eq!(
            derive_filename("Rencana Pembelajaran Semester", "<p></p>"),
            "rencana-pembelajaran-semester.html"
        );
    }

    #[test]
    fn bahan_ajar_uses_metadata_tags_when_present() {
        let html = "<p>[Mapel: Ilmu Pengetahuan Alam]</p><p>[Pertemuan: 3]</p>";
        assert_eq!(
            derive_filename("Bahan Ajar", html),
            "bahan-ajar-ilmu-pengetahuan-alam-pertemuan-3.html"
        );
    }

    #[test]
    fn bahan_ajar_without_tags_falls_back_to_the_title() {
        assert_eq!(
            derive_filename("Bahan Ajar Kelas 4", "<p>tanpa tag</p>"),
            "bahan-ajar-kelas-4.html"
        );
    }
}
