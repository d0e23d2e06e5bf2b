//! System instructions and payload headers for each pass.

use crate::config::{PassConfig, PassKind};

/// System instruction for a pass.
///
/// The response delimiter and fence language are spelled out verbatim so
/// the service's output matches what the splitter and extractor expect.
#[must_use]
pub fn system_prompt(kind: PassKind, pass: &PassConfig) -> String {
    if let Some(custom) = &pass.system_prompt {
        return custom.clone();
    }
    let lang = &pass.fence_language;
    let delim = &pass.response_delimiter;
    let format_rules = format!(
        "Reply with code only, no prose. Wrap every converted file in its own ```{lang} ... ``` block. \
         Return exactly one block per input file, in the same order as the input files, \
         and put the line {delim} between consecutive files.\n"
    );

    match kind {
        PassKind::Pages => format!(
            "You will receive page object classes (Page Object Model) written in Java with Selenium, \
             each preceded by its path. Convert each one into an equivalent Playwright page object \
             written in TypeScript.\n{format_rules}\
             Rules:\n\
             1. Keep the Playwright `Page` as a protected property of the BasePage class so subclasses can use it.\n\
             2. Do not import unused objects or classes.\n\
             3. Import from '@playwright/test', not from 'playwright'.\n"
        ),
        PassKind::Tests => format!(
            "You will receive test classes written in Java with Selenium and TestNG, each preceded by its \
             path, followed by the page object classes they use as context. Convert each test class into \
             an equivalent Playwright test file written in TypeScript. Convert only the test classes; \
             the context produces no output.\n{format_rules}\
             Rules:\n\
             1. Playwright tests are not classes; replace inheritance with plain functions or fixtures.\n\
             2. Playwright starts and closes the browser itself; drop driver setup and teardown code.\n\
             3. Import page objects using the page object paths and the test folder given in the context.\n\
             4. Use the built-in `page` fixture instead of constructing a Page.\n\
             5. Map @BeforeClass to test.beforeAll, @AfterClass to test.afterAll, @BeforeMethod to test.beforeEach and @AfterMethod to test.afterEach.\n\
             6. Tests must run independently; prefer beforeEach/afterEach over beforeAll/afterAll.\n\
             7. Do not import unused objects or classes.\n\
             8. Import `test` and `expect` from '@playwright/test', not from 'playwright'.\n"
        ),
    }
}

/// Line opening the request payload.
#[must_use]
pub fn payload_header(kind: PassKind) -> &'static str {
    match kind {
        PassKind::Pages => "Below are the paths and contents of page object files written in Java Selenium:",
        PassKind::Tests => {
            "Below are the paths and contents of test files written in Java Selenium using TestNG:"
        }
    }
}
