#[cfg(test)]
pub mod test {
    /// Nested sections, quoted names, a presence-only flag and a multi-value list.
    pub const NESTED_SERVER: &str = r#"
# front end server
server {
    name = "front end"
    root = /srv/www
    debug;
    http {
        port = 8080
        keepalive = Yes
        listen = 0.0.0.0, ::1
    }
}
"#;

    /// Three sibling sections sharing one name.
    pub const REPEATED_SECTIONS: &str = "
mount { path = /a; }
mount { path = /b; }
mount { path = /c; }
";

    /// Value lists with multi-word and quoted entries.
    pub const MULTI_VALUE: &str = r#"
hosts = alpha, beta gamma, delta
greeting = "hello, world"
"#;

    /// Whitespace-separated variable list with section toggles.
    pub const VARLIST: &str = "
prefix=/usr/local
+ssl -debug
jobs = 4
verbose
";

    // -- Sanity checks on the fixtures themselves --------------------------------

    #[test]
    fn nested_server_parses() {
        let config: crate::Config = NESTED_SERVER.parse().unwrap();
        assert_eq!(config.root().len(), 1);
    }

    #[test]
    fn varlist_parses() {
        let varlist: crate::Varlist = VARLIST.parse().unwrap();
        assert!(!varlist.vars().is_empty());
    }
}
