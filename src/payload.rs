//! Invalidation request body.
//!
//! Each URL becomes one `<property>` whose single path `/*` covers the whole
//! property. Values are trusted and inserted without XML escaping.

/// Build the `<properties>` document for the given URLs, in order.
pub fn build_properties_xml<S: AsRef<str>>(urls: &[S]) -> String {
    let mut xml = String::from("<properties>");
    for url in urls {
        xml.push_str("<property><name>");
        xml.push_str(url.as_ref());
        xml.push_str("</name><paths><path>/*</path></paths></property>");
    }
    xml.push_str("</properties>");
    xml
}

/// Encode a body one byte per character; anything outside ASCII becomes `?`.
pub fn encode_ascii(body: &str) -> Vec<u8> {
    body.chars()
        .map(|c| if c.is_ascii() { c as u8 } else { b'?' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_urls() {
        assert_eq!(
            build_properties_xml(&["a.com", "b.com"]),
            "<properties>\
             <property><name>a.com</name><paths><path>/*</path></paths></property>\
             <property><name>b.com</name><paths><path>/*</path></paths></property>\
             </properties>"
        );
    }

    #[test]
    fn test_empty_batch() {
        let urls: Vec<String> = Vec::new();
        assert_eq!(build_properties_xml(&urls), "<properties></properties>");
    }

    #[test]
    fn test_values_not_escaped() {
        let xml = build_properties_xml(&["a.com/?x=1&y=2"]);
        assert!(xml.contains("<name>a.com/?x=1&y=2</name>"));
    }

    #[test]
    fn test_encode_ascii() {
        assert_eq!(encode_ascii("a.com"), b"a.com".to_vec());
        // one byte per char, multi-byte chars collapse to '?'
        let encoded = encode_ascii("bücher.de");
        assert_eq!(encoded, b"b?cher.de".to_vec());
        assert_eq!(encoded.len(), "bücher.de".chars().count());
    }
}
