/// Join a path with a URL, ensuring that there is only one slash between them.
/// It doesn't matter if the URL ends with a slash or the path starts with one.
pub fn join(url: &reqwest::Url, mut path: &str) -> reqwest::Url {
    let mut url = url.to_string();
    while url.ends_with('/') {
        url.pop();
    }
    while path.starts_with('/') {
        path = &path[1..]
    }
    reqwest::Url::parse(&format!("{url}/{path}")).unwrap()
}
