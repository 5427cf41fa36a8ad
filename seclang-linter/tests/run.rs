// Copyright Amazon Web Services, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

pub(crate) mod utils;

#[cfg(test)]
mod run_tests {
    use indoc::{formatdoc, indoc};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use seclang_linter::commands::{
        ALPHABETICAL, CONFIG, JOBS, LAST_MODIFIED, OUTPUT_FORMAT, RUN, ZERO_ARITY,
    };
    use seclang_linter::utils::reader::Reader;

    use crate::assert_output_from_str_eq;
    use crate::utils::{empty_writer, CommandTestRunner, StatusCode};

    #[derive(Default)]
    struct RunTestRunner<'args> {
        paths: Vec<&'args str>,
        alphabetical: bool,
        last_modified: bool,
        output_format: Option<&'args str>,
        zero_arity: Vec<&'args str>,
        config: Option<&'args str>,
        jobs: Option<usize>,
    }

    impl<'args> RunTestRunner<'args> {
        fn paths(&'args mut self, args: Vec<&'args str>) -> &'args mut RunTestRunner {
            self.paths = args;
            self
        }

        fn alphabetical(&'args mut self, arg: bool) -> &'args mut RunTestRunner {
            self.alphabetical = arg;
            self
        }

        #[allow(dead_code)]
        fn last_modified(&'args mut self, arg: bool) -> &'args mut RunTestRunner {
            self.last_modified = arg;
            self
        }

        fn output_format(&'args mut self, arg: Option<&'args str>) -> &'args mut RunTestRunner {
            self.output_format = arg;
            self
        }

        fn zero_arity(&'args mut self, args: Vec<&'args str>) -> &'args mut RunTestRunner {
            self.zero_arity = args;
            self
        }

        fn config(&'args mut self, arg: Option<&'args str>) -> &'args mut RunTestRunner {
            self.config = arg;
            self
        }

        fn jobs(&'args mut self, arg: Option<usize>) -> &'args mut RunTestRunner {
            self.jobs = arg;
            self
        }
    }

    impl<'args> CommandTestRunner for RunTestRunner<'args> {
        fn build_args(&self) -> Vec<String> {
            let mut args = vec![String::from(RUN)];

            if self.alphabetical {
                args.push(format!("-{}", ALPHABETICAL.1));
            }

            if self.last_modified {
                args.push(format!("-{}", LAST_MODIFIED.1));
            }

            if let Some(format) = self.output_format {
                args.push(format!("--{}", OUTPUT_FORMAT.0));
                args.push(format.to_string());
            }

            for keyword in &self.zero_arity {
                args.push(format!("-{}", ZERO_ARITY.1));
                args.push(keyword.to_string());
            }

            if let Some(config) = self.config {
                args.push(format!("--{}", CONFIG.0));
                args.push(config.to_string());
            }

            if let Some(jobs) = self.jobs {
                args.push(format!("--{}", JOBS.0));
                args.push(jobs.to_string());
            }

            args.extend(self.paths.iter().map(|path| path.to_string()));
            args
        }
    }

    fn reader() -> Reader {
        Reader::default()
    }

    #[rstest]
    #[case(vec!["resources/run/rules-dir"])]
    #[case(vec!["resources/run/rules-dir/..."])]
    fn directory_of_valid_files(#[case] paths: Vec<&str>) {
        let mut writer = empty_writer();
        let status_code = RunTestRunner::default()
            .paths(paths)
            .alphabetical(true)
            .run(&mut writer, &mut reader());

        assert_eq!(StatusCode::SUCCESS, status_code);
        assert_output_from_str_eq!(
            indoc! {r#"
                validating file resources/run/rules-dir/crs-setup.conf.........success!
                validating file resources/run/rules-dir/rules/request-901.conf.........success!
                2 of 2 files passed
            "#},
            writer
        );
    }

    #[test]
    fn unterminated_quote_fails_the_file() {
        let mut writer = empty_writer();
        let status_code = RunTestRunner::default()
            .paths(vec!["resources/run/broken/unterminated.conf"])
            .run(&mut writer, &mut reader());

        assert_eq!(StatusCode::LINT_FAILURE, status_code);
        assert_output_from_str_eq!(
            indoc! {r#"
                validating file resources/run/broken/unterminated.conf.........failed!
                Error: unterminated quoted option, expected a closing `"` before the end of the line, while parsing directives/directive/options
                resources/run/broken/unterminated.conf: line 1, column 13:
                SecRule ARGS "@rx foo
                             ^^^^ ^^^
                0 of 1 files passed
            "#},
            writer
        );
    }

    #[test]
    fn one_failure_does_not_stop_the_batch() {
        let mut writer = empty_writer();
        let status_code = RunTestRunner::default()
            .paths(vec![
                "resources/run/broken/unknown.conf",
                "resources/run/rules-dir/crs-setup.conf",
            ])
            .run(&mut writer, &mut reader());

        assert_eq!(StatusCode::LINT_FAILURE, status_code);
        // the underline spans the whole displayed line, padded with spaces
        let expected = formatdoc!(
            r#"
                validating file resources/run/broken/unknown.conf.........failed!
                Error: unrecognized directive `SecRul`, while parsing directives
                resources/run/broken/unknown.conf: line 1, column 0:
                SecRul ARGS "@rx x" "id:1"
                {:<26}
                validating file resources/run/rules-dir/crs-setup.conf.........success!
                1 of 2 files passed
            "#,
            "^^^^^^"
        );
        assert_output_from_str_eq!(&expected, writer);
    }

    #[test]
    fn warnings_do_not_fail_the_file() {
        let mut writer = empty_writer();
        let status_code = RunTestRunner::default()
            .paths(vec!["resources/run/dangling.conf"])
            .run(&mut writer, &mut reader());

        assert_eq!(StatusCode::SUCCESS, status_code);
        assert_output_from_str_eq!(
            indoc! {r#"
                validating file resources/run/dangling.conf.........success!
                Warning: line continuation after `SecRuleEngine` is not followed by another option
                resources/run/dangling.conf: line 1, column 17:
                SecRuleEngine On \
                                 ^
                1 of 1 files passed
            "#},
            writer
        );
    }

    #[rstest]
    #[case(vec![], None, StatusCode::LINT_FAILURE)]
    #[case(vec!["SecAction"], None, StatusCode::SUCCESS)]
    #[case(vec![], Some("resources/run/config/zero-arity.yaml"), StatusCode::SUCCESS)]
    fn zero_arity_keywords(
        #[case] zero_arity: Vec<&str>,
        #[case] config: Option<&str>,
        #[case] expected_status_code: i32,
    ) {
        let mut writer = empty_writer();
        let status_code = RunTestRunner::default()
            .paths(vec!["resources/run/zero-arity.conf"])
            .zero_arity(zero_arity)
            .config(config)
            .run(&mut writer, &mut reader());

        assert_eq!(expected_status_code, status_code);
    }

    #[test]
    fn missing_options_message() {
        let mut writer = empty_writer();
        RunTestRunner::default()
            .paths(vec!["resources/run/zero-arity.conf"])
            .run(&mut writer, &mut reader());

        let output = writer.stripped().unwrap();
        assert!(output.contains(indoc! {r#"
            Error: directive `SecAction` requires at least one option, while parsing directives/directive
            resources/run/zero-arity.conf: line 1, column 0:
            SecAction
            ^^^^^^^^^
        "#}));
    }

    #[test]
    fn json_report_lists_every_file() {
        let mut writer = empty_writer();
        let status_code = RunTestRunner::default()
            .paths(vec!["resources/run/broken"])
            .alphabetical(true)
            .output_format(Some("json"))
            .run(&mut writer, &mut reader());

        assert_eq!(StatusCode::LINT_FAILURE, status_code);
        let report: serde_json::Value =
            serde_json::from_str(&writer.stripped().unwrap()).unwrap();
        assert_eq!(report["passed"], 0);
        assert_eq!(report["total"], 2);
        assert_eq!(report["files"][0]["name"], "resources/run/broken/unknown.conf");
        assert_eq!(report["files"][0]["status"], "FAIL");
        assert_eq!(report["files"][0]["error"]["kind"], "UnrecognizedDirective");
        assert_eq!(report["files"][1]["error"]["kind"], "UnterminatedQuote");
        assert_eq!(report["files"][1]["error"]["line"], 1);
        assert_eq!(report["files"][1]["error"]["column"], 13);
        assert_eq!(report["files"][1]["error"]["context"], "directives/directive/options");
    }

    #[test]
    fn yaml_report() {
        let mut writer = empty_writer();
        let status_code = RunTestRunner::default()
            .paths(vec!["resources/run/rules-dir/rules/request-901.conf"])
            .output_format(Some("yaml"))
            .run(&mut writer, &mut reader());

        assert_eq!(StatusCode::SUCCESS, status_code);
        let report: serde_yaml::Value = serde_yaml::from_str(&writer.stripped().unwrap()).unwrap();
        assert_eq!(report["passed"].as_u64(), Some(1));
        assert_eq!(report["files"][0]["status"].as_str(), Some("PASS"));
        assert_eq!(report["files"][0]["directives"].as_u64(), Some(3));
    }

    #[test]
    fn parallel_jobs_keep_discovery_order() {
        let mut sequential = empty_writer();
        let sequential_status = RunTestRunner::default()
            .paths(vec!["resources/run"])
            .alphabetical(true)
            .run(&mut sequential, &mut reader());

        let mut parallel = empty_writer();
        let parallel_status = RunTestRunner::default()
            .paths(vec!["resources/run"])
            .alphabetical(true)
            .jobs(Some(3))
            .run(&mut parallel, &mut reader());

        assert_eq!(StatusCode::LINT_FAILURE, sequential_status);
        assert_eq!(sequential_status, parallel_status);

        let output = sequential.stripped().unwrap();
        assert_eq!(output, parallel.stripped().unwrap());
        assert!(output.ends_with("3 of 6 files passed\n"));
    }

    #[test]
    fn missing_path_is_a_command_error() {
        let mut writer = empty_writer();
        let status_code = RunTestRunner::default()
            .paths(vec!["resources/run/does-not-exist.conf"])
            .run(&mut writer, &mut reader());

        assert_eq!(StatusCode::INTERNAL_FAILURE, status_code);
        assert_eq!(
            "Error occurred The path `resources/run/does-not-exist.conf` does not exist\n",
            writer.err_to_stripped().unwrap()
        );
    }
}
