//! Catalog of supported snippet languages and client libraries.
//!
//! Each language declares the client libraries it can render and one default
//! client used when a target names the language alone. Every client carries
//! the `tera` template that renders it.

use serde::Serialize;

/// A client library within a language, e.g. `axios` for `node`.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ClientInfo {
    pub key: &'static str,
    pub title: &'static str,
    pub link: &'static str,
    pub description: &'static str,
    #[serde(skip)]
    pub(crate) template: &'static str,
}

/// A language with its client libraries.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TargetInfo {
    pub key: &'static str,
    pub title: &'static str,
    pub default: &'static str,
    pub clients: &'static [ClientInfo],
}

impl TargetInfo {
    /// Look up one of this language's clients
    pub fn client(&self, key: &str) -> Option<&'static ClientInfo> {
        self.clients.iter().find(|client| client.key == key)
    }

    /// The client used when none is named
    pub fn default_client(&self) -> Option<&'static ClientInfo> {
        self.client(self.default)
    }
}

macro_rules! client {
    ($lang:literal, $key:literal, $title:literal, $link:literal, $description:literal) => {
        ClientInfo {
            key: $key,
            title: $title,
            link: $link,
            description: $description,
            template: include_str!(concat!("../templates/", $lang, "/", $key, ".tera")),
        }
    };
}

static TARGETS: &[TargetInfo] = &[
    TargetInfo {
        key: "c",
        title: "C",
        default: "libcurl",
        clients: &[client!(
            "c",
            "libcurl",
            "Libcurl",
            "http://curl.haxx.se/libcurl",
            "Simple REST and HTTP API Client for C"
        )],
    },
    TargetInfo {
        key: "clojure",
        title: "Clojure",
        default: "clj_http",
        clients: &[client!(
            "clojure",
            "clj_http",
            "clj-http",
            "https://github.com/dakrone/clj-http",
            "An idiomatic clojure http client wrapping the apache client."
        )],
    },
    TargetInfo {
        key: "csharp",
        title: "C#",
        default: "restsharp",
        clients: &[
            client!(
                "csharp",
                "restsharp",
                "RestSharp",
                "http://restsharp.org/",
                "Simple REST and HTTP API Client for .NET"
            ),
            client!(
                "csharp",
                "httpclient",
                "HttpClient",
                "https://docs.microsoft.com/en-us/dotnet/api/system.net.http.httpclient",
                ".NET Standard HTTP Client"
            ),
        ],
    },
    TargetInfo {
        key: "go",
        title: "Go",
        default: "native",
        clients: &[client!(
            "go",
            "native",
            "NewRequest",
            "http://golang.org/pkg/net/http/#NewRequest",
            "Golang HTTP client request"
        )],
    },
    TargetInfo {
        key: "http",
        title: "HTTP",
        default: "http1.1",
        clients: &[client!(
            "http",
            "http1.1",
            "HTTP/1.1",
            "https://tools.ietf.org/html/rfc7230",
            "HTTP/1.1 request string in accordance with RFC 7230"
        )],
    },
    TargetInfo {
        key: "java",
        title: "Java",
        default: "unirest",
        clients: &[
            client!(
                "java",
                "unirest",
                "Unirest",
                "http://unirest.io/java.html",
                "Lightweight HTTP Request Client Library"
            ),
            client!(
                "java",
                "okhttp",
                "OkHttp",
                "http://square.github.io/okhttp/",
                "An HTTP Request Client Library"
            ),
            client!(
                "java",
                "nethttp",
                "java.net.http",
                "https://openjdk.java.net/groups/net/httpclient/intro.html",
                "Java Standardized HTTP Client API"
            ),
        ],
    },
    TargetInfo {
        key: "javascript",
        title: "JavaScript",
        default: "xhr",
        clients: &[
            client!(
                "javascript",
                "xhr",
                "XMLHttpRequest",
                "https://developer.mozilla.org/en-US/docs/Web/API/XMLHttpRequest",
                "W3C Standard API that provides scripted client functionality"
            ),
            client!(
                "javascript",
                "fetch",
                "fetch",
                "https://developer.mozilla.org/en-US/docs/Web/API/Fetch_API",
                "Perform asynchronous HTTP requests with the Fetch API"
            ),
            client!(
                "javascript",
                "axios",
                "Axios",
                "https://github.com/axios/axios",
                "Promise based HTTP client for the browser and node.js"
            ),
            client!(
                "javascript",
                "jquery",
                "jQuery",
                "http://api.jquery.com/jquery.ajax/",
                "Perform an asynchronous HTTP (Ajax) requests with jQuery"
            ),
        ],
    },
    TargetInfo {
        key: "kotlin",
        title: "Kotlin",
        default: "okhttp",
        clients: &[client!(
            "kotlin",
            "okhttp",
            "OkHttp",
            "http://square.github.io/okhttp/",
            "An HTTP Request Client Library"
        )],
    },
    TargetInfo {
        key: "node",
        title: "Node.js",
        default: "native",
        clients: &[
            client!(
                "node",
                "native",
                "HTTP",
                "http://nodejs.org/api/http.html#http_http_request_options_callback",
                "Node.js native HTTP interface"
            ),
            client!(
                "node",
                "request",
                "Request",
                "https://github.com/request/request",
                "Simplified HTTP request client"
            ),
            client!(
                "node",
                "axios",
                "Axios",
                "https://github.com/axios/axios",
                "Promise based HTTP client for the browser and node.js"
            ),
            client!(
                "node",
                "fetch",
                "Fetch",
                "https://github.com/bitinn/node-fetch",
                "Simplified HTTP node-fetch client"
            ),
        ],
    },
    TargetInfo {
        key: "php",
        title: "PHP",
        default: "curl",
        clients: &[
            client!(
                "php",
                "curl",
                "cURL",
                "http://php.net/manual/en/book.curl.php",
                "PHP with ext-curl"
            ),
            client!(
                "php",
                "guzzle",
                "Guzzle",
                "http://docs.guzzlephp.org/en/stable/",
                "PHP with Guzzle"
            ),
        ],
    },
    TargetInfo {
        key: "powershell",
        title: "PowerShell",
        default: "webrequest",
        clients: &[
            client!(
                "powershell",
                "webrequest",
                "Invoke-WebRequest",
                "https://docs.microsoft.com/en-us/powershell/module/Microsoft.PowerShell.Utility/Invoke-WebRequest",
                "Powershell Invoke-WebRequest client"
            ),
            client!(
                "powershell",
                "restmethod",
                "Invoke-RestMethod",
                "https://docs.microsoft.com/en-us/powershell/module/Microsoft.PowerShell.Utility/Invoke-RestMethod",
                "Powershell Invoke-RestMethod client"
            ),
        ],
    },
    TargetInfo {
        key: "python",
        title: "Python",
        default: "python3",
        clients: &[
            client!(
                "python",
                "python3",
                "http.client",
                "https://docs.python.org/3/library/http.client.html",
                "Python3 HTTP Client"
            ),
            client!(
                "python",
                "requests",
                "Requests",
                "http://docs.python-requests.org/en/latest/api/#requests.request",
                "Requests HTTP library"
            ),
        ],
    },
    TargetInfo {
        key: "ruby",
        title: "Ruby",
        default: "native",
        clients: &[client!(
            "ruby",
            "native",
            "net::http",
            "http://ruby-doc.org/stdlib-2.2.1/libdoc/net/http/rdoc/Net/HTTP.html",
            "Ruby HTTP client"
        )],
    },
    TargetInfo {
        key: "rust",
        title: "Rust",
        default: "reqwest",
        clients: &[client!(
            "rust",
            "reqwest",
            "reqwest",
            "https://docs.rs/reqwest/latest/reqwest/",
            "reqwest HTTP library"
        )],
    },
    TargetInfo {
        key: "shell",
        title: "Shell",
        default: "curl",
        clients: &[
            client!(
                "shell",
                "curl",
                "cURL",
                "http://curl.haxx.se/",
                "cURL is a command line tool and library for transferring data with URL syntax"
            ),
            client!(
                "shell",
                "httpie",
                "HTTPie",
                "http://httpie.org/",
                "a CLI, cURL-like tool for humans"
            ),
            client!(
                "shell",
                "wget",
                "Wget",
                "https://www.gnu.org/software/wget/",
                "a free software package for retrieving files using HTTP, HTTPS"
            ),
        ],
    },
    TargetInfo {
        key: "swift",
        title: "Swift",
        default: "nsurlsession",
        clients: &[client!(
            "swift",
            "nsurlsession",
            "NSURLSession",
            "https://developer.apple.com/library/mac/documentation/Foundation/Reference/NSURLSession_class/index.html",
            "Foundation's NSURLSession request"
        )],
    },
];

/// All languages the converters can render, in catalog order.
pub fn available_targets() -> &'static [TargetInfo] {
    TARGETS
}

/// Look up a language by key
pub fn find_target(key: &str) -> Option<&'static TargetInfo> {
    TARGETS.iter().find(|target| target.key == key)
}

/// Name under which a client's template is registered
pub(crate) fn template_name(language: &str, client: &str) -> String {
    format!("{}/{}", language, client)
}
